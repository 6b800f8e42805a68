use clap::Parser;

fn main() -> Result<(), pixel_eraser::Error> {
    pixel_eraser::run_native(pixel_eraser::Args::parse())
}
