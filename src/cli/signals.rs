//! Event sources for the interview loop: operator input and shutdown signals

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::interview::OperatorCommand;

/// Events driving the interview loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewEvent {
    /// A parsed operator command
    Command(OperatorCommand),
    /// A line that is not a command; carries the parse error message
    Unrecognized(String),
    /// SIGINT or SIGTERM
    Shutdown,
    /// Operator input reached end of file
    InputClosed,
}

/// Interview event handler
///
/// Listens for OS shutdown signals (SIGINT/SIGTERM) and hands out a sender
/// for other sources (the stdin reader) to feed the same loop.
pub struct InterviewEvents {
    receiver: mpsc::Receiver<InterviewEvent>,
}

impl InterviewEvents {
    /// Create the handler and start listening for shutdown signals
    pub async fn new() -> Result<(Self, mpsc::Sender<InterviewEvent>), std::io::Error> {
        let (tx, rx) = mpsc::channel(16);
        Self::listen_for_shutdown(tx.clone())?;
        Ok((Self { receiver: rx }, tx))
    }

    #[cfg(unix)]
    fn listen_for_shutdown(tx: mpsc::Sender<InterviewEvent>) -> Result<(), std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            debug!("received SIGINT");
            let _ = tx_int.send(InterviewEvent::Shutdown).await;
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            debug!("received SIGTERM");
            let _ = tx.send(InterviewEvent::Shutdown).await;
        });

        Ok(())
    }

    #[cfg(not(unix))]
    fn listen_for_shutdown(tx: mpsc::Sender<InterviewEvent>) -> Result<(), std::io::Error> {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("received Ctrl+C");
                let _ = tx.send(InterviewEvent::Shutdown).await;
            }
        });
        Ok(())
    }

    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<InterviewEvent> {
        self.receiver.recv().await
    }
}

/// Forward operator input, one command per line, until EOF
pub async fn forward_commands<R>(input: R, tx: mpsc::Sender<InterviewEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let event = match lines.next_line().await {
            Ok(Some(line)) => parse_line(&line),
            Ok(None) | Err(_) => InterviewEvent::InputClosed,
        };
        let closed = event == InterviewEvent::InputClosed;
        if tx.send(event).await.is_err() || closed {
            break;
        }
    }
}

/// Spawn a task reading commands from stdin
pub fn spawn_stdin_reader(tx: mpsc::Sender<InterviewEvent>) {
    tokio::spawn(forward_commands(BufReader::new(tokio::io::stdin()), tx));
}

fn parse_line(line: &str) -> InterviewEvent {
    match line.parse::<OperatorCommand>() {
        Ok(command) => InterviewEvent::Command(command),
        Err(e) => InterviewEvent::Unrecognized(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_become_commands() {
        assert_eq!(
            parse_line("stop"),
            InterviewEvent::Command(OperatorCommand::Stop)
        );
        assert_eq!(parse_line(""), InterviewEvent::Command(OperatorCommand::Primary));
        assert!(matches!(parse_line("dance"), InterviewEvent::Unrecognized(_)));
    }

    #[tokio::test]
    async fn forwards_until_eof() {
        let (tx, mut rx) = mpsc::channel(8);
        let input: &[u8] = b"start\n\nnope\nq\n";
        forward_commands(input, tx).await;

        assert_eq!(rx.recv().await, Some(InterviewEvent::Command(OperatorCommand::Start)));
        assert_eq!(rx.recv().await, Some(InterviewEvent::Command(OperatorCommand::Primary)));
        assert!(matches!(rx.recv().await, Some(InterviewEvent::Unrecognized(_))));
        assert_eq!(rx.recv().await, Some(InterviewEvent::Command(OperatorCommand::Quit)));
        assert_eq!(rx.recv().await, Some(InterviewEvent::InputClosed));
        assert_eq!(rx.recv().await, None);
    }
}
