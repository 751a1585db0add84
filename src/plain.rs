//! Line mode: the same session over stdin/stdout, no terminal UI.
//!
//! Each input line is one submission. `/new` starts a new chat and `/quit`
//! (or end of input) exits.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::chat::{ChatBackend, Message, Role, Session};

pub async fn run(session: Session, backend: &dyn ChatBackend) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_with(session, backend, stdin, stdout).await
}

async fn run_with<R, W>(
    mut session: Session,
    backend: &dyn ChatBackend,
    reader: R,
    mut out: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    for msg in session.messages() {
        write_message(&mut out, msg).await?;
    }

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/new" => {
                session.reset();
                for msg in session.messages() {
                    write_message(&mut out, msg).await?;
                }
                continue;
            }
            _ => {}
        }

        let mut input = line;
        if session.exchange(&mut input, backend).await {
            if let Some(reply) = session.messages().last() {
                write_message(&mut out, reply).await?;
            }
        }
    }

    out.flush().await?;
    Ok(())
}

async fn write_message<W: AsyncWrite + Unpin>(out: &mut W, msg: &Message) -> Result<()> {
    let label = match msg.role {
        Role::User => t!("chat.you"),
        Role::Assistant => t!("chat.agent"),
    };
    out.write_all(format!("{}: {}\n", label, msg.content).as_bytes())
        .await?;
    out.flush().await?;
    Ok(())
}
