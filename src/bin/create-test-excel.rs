fn main() {
    if let Err(err) = sroi_fixture::run(std::env::args_os()) {
        eprintln!("Error creating test workbook: {err:#}");
        std::process::exit(1);
    }
}
