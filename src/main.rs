use std::error::Error;

use os_lab_report::labs;
use os_lab_report::report::ReportBuilder;

const OUTPUT_PATH: &str = "OS_Lab_Codes_Output.pdf";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    ReportBuilder::new(labs::BANNER)
        .add_records(labs::builtin_records())
        .render_to_file(OUTPUT_PATH)?;
    println!("PDF generated successfully: {}", OUTPUT_PATH);
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
