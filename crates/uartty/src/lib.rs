mod host;

pub use host::EchoHost;

use anyhow::{bail, Context, Result};
use uartty_device::{BaudRate, UartConfig};
use uartty_term::{HostTerminal, InputSource};

pub const DEFAULT_BAUD_RATE: i64 = 9600;

/// Build the device configuration and input source from positional
/// arguments `[baud] [redirect-file]` and an optional time base override.
pub fn parse_args<I>(args: I, time_base: Option<String>) -> Result<(UartConfig, InputSource)>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let baud_rate = match args.next() {
        Some(baud) => baud.parse::<BaudRate>()?,
        None => BaudRate::new(DEFAULT_BAUD_RATE)?,
    };
    let input = match args.next() {
        Some(path) => InputSource::Redirect(path.into()),
        None => InputSource::Console,
    };
    if let Some(extra) = args.next() {
        bail!("unexpected argument '{}'", extra);
    }

    let config = match time_base {
        Some(time_base) => {
            let time_base = time_base
                .trim()
                .parse::<u32>()
                .with_context(|| format!("time base {:?} is not a number", time_base))?;
            UartConfig::builder()
                .baud_rate(baud_rate)
                .time_base(time_base)
                .build()
        }
        None => UartConfig::builder().baud_rate(baud_rate).build(),
    };
    config.validate()?;
    Ok((config, input))
}

pub fn run(config: UartConfig, input: InputSource) -> Result<()> {
    let terminal = HostTerminal::open(&input)
        .with_context(|| format!("failed to open input source {:?}", input))?;
    let mut host = EchoHost::new(config, terminal).context("invalid UART configuration")?;
    host.run_realtime();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uartty_device::ConfigError;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_console_at_9600() {
        let (config, input) = parse_args(args(&[]), None).unwrap();
        assert_eq!(config.baud_rate.bps(), 9600);
        assert_eq!(config.time_base, 1_000_000);
        assert_eq!(input, InputSource::Console);
    }

    #[test]
    fn redirect_file_and_time_base() {
        let (config, input) =
            parse_args(args(&["1200", "ASCIIART.BAS"]), Some("2000000".into())).unwrap();
        assert_eq!(config.baud_rate.bps(), 1200);
        assert_eq!(config.time_base, 2_000_000);
        assert_eq!(input, InputSource::Redirect("ASCIIART.BAS".into()));
    }

    #[test]
    fn bad_baud_rate_is_a_config_error() {
        let err = parse_args(args(&["0"]), None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::InvalidBaudRate(0))
        );
    }

    #[test]
    fn zero_time_base_is_rejected() {
        let err = parse_args(args(&["9600"]), Some("0".into())).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::InvalidTimeBase(0))
        );
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(parse_args(args(&["9600", "a.bas", "b.bas"]), None).is_err());
    }
}
