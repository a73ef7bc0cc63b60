use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const PROMPT: &str = "> ";

pub fn is_exit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Reads lines until `exit` is typed or the input closes, prompting after
/// every other line.
pub async fn wait_for_exit<R>(input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    show_prompt();

    while let Some(line) = lines.next_line().await? {
        if is_exit_command(&line) {
            return Ok(());
        }
        show_prompt();
    }

    log::debug!("Terminal input closed");
    Ok(())
}

fn show_prompt() {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{PROMPT}");
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncWriteExt, BufReader};

    use super::*;

    #[test]
    fn recognises_exit_case_insensitively_and_trimmed() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  EXIT \n"));
        assert!(is_exit_command("Exit"));
    }

    #[test]
    fn other_lines_are_not_exit() {
        assert!(!is_exit_command(""));
        assert!(!is_exit_command("quit"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("e x i t"));
    }

    #[tokio::test(start_paused = true)]
    async fn returns_once_exit_is_typed() {
        let (mut writer, reader) = tokio::io::duplex(64);
        writer.write_all(b"status\n  Exit \n").await.unwrap();

        let result =
            tokio::time::timeout(Duration::from_secs(1), wait_for_exit(BufReader::new(reader)))
                .await;

        assert!(matches!(result, Ok(Ok(()))));
        drop(writer);
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_waiting_without_exit() {
        let (mut writer, reader) = tokio::io::duplex(64);
        writer.write_all(b"status\nhelp\n").await.unwrap();

        let result =
            tokio::time::timeout(Duration::from_secs(1), wait_for_exit(BufReader::new(reader)))
                .await;

        assert!(result.is_err(), "Should still be waiting for exit");
        drop(writer);
    }

    #[tokio::test]
    async fn closed_input_ends_the_wait() {
        let input: &[u8] = b"status\n";

        wait_for_exit(input).await.unwrap();
    }
}
