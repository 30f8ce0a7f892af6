use std::io::{BufRead, Write};

use anyhow::{bail, Context};

use crate::alarm_time::AlarmTime;

const PROMPT: &str = "Enter alarm time (HH:MM): ";

/// Asks for an alarm time until a valid one is entered.
pub fn read_alarm_time<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<AlarmTime, anyhow::Error> {
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        let bytes_read = input
            .read_line(&mut line)
            .context("Failed to read alarm time")?;
        if bytes_read == 0 {
            bail!("No alarm time entered");
        }

        match line.parse::<AlarmTime>() {
            Ok(alarm_time) => return Ok(alarm_time),
            Err(error) => {
                log::warn!("Rejected alarm time input {:?}", line.trim());
                writeln!(output, "{}", error)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_first_valid_line() {
        let mut output = Vec::new();
        let alarm_time = read_alarm_time(&b"06:30\n"[..], &mut output).unwrap();

        assert_eq!(alarm_time, AlarmTime::new(6, 30).unwrap());
        assert_eq!(String::from_utf8(output).unwrap(), PROMPT);
    }

    #[test]
    fn reprompts_after_malformed_input() {
        let mut output = Vec::new();
        let alarm_time = read_alarm_time(&b"soon\n25:00\n21:15\n"[..], &mut output).unwrap();

        assert_eq!(alarm_time, AlarmTime::new(21, 15).unwrap());
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches(PROMPT).count(), 3);
        assert!(output.contains("invalid time format 'soon'"));
        assert!(output.contains("hour 25 is out of range"));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut output = Vec::new();
        let result = read_alarm_time(&b"nope\n"[..], &mut output);

        assert!(result.is_err());
    }
}
