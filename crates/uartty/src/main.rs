fn main() {
    env_logger::init();

    let time_base = std::env::var("UARTTY_TIME_BASE").ok();
    let (config, input) = match uartty::parse_args(std::env::args().skip(1), time_base) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{:#}", err);
            eprintln!("Usage: uartty [baud] [redirect-file]");
            std::process::exit(1);
        }
    };

    log::info!("Starting UART at {} with {:?}", config.baud_rate, input);
    if let Err(err) = uartty::run(config, input) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
