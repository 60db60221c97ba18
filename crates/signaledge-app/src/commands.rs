//! Subcommand handlers. Each runs against an already-initialized client.

use std::io::Write;

use signaledge_ai::Message;
use signaledge_client::{ClientHandle, Event};
use signaledge_common::{Result, SignalEdgeError};

use crate::cli::ClientCommand;

pub async fn run(command: ClientCommand, client: ClientHandle) -> Result<()> {
    match command {
        ClientCommand::Check => {
            println!("{}", signaledge_config::config_to_json(client.config()));
            Ok(())
        }
        ClientCommand::Infer {
            prompt,
            system,
            stream,
        } => infer(&client, prompt, system, stream).await,
        ClientCommand::Send { name, data, id } => send(&client, name, &data, id).await,
    }
}

async fn infer(
    client: &ClientHandle,
    prompt: String,
    system: Option<String>,
    stream: bool,
) -> Result<()> {
    let messages = build_messages(prompt, system);

    let response = if stream {
        let response = client
            .infer_streaming(
                &messages,
                &[],
                Box::new(|chunk: String| {
                    print!("{chunk}");
                    let _ = std::io::stdout().flush();
                }),
            )
            .await?;
        println!();
        response
    } else {
        let response = client.infer(&messages, &[]).await?;
        println!("{}", response.content);
        response
    };

    tracing::info!(
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "inference complete"
    );
    Ok(())
}

async fn send(client: &ClientHandle, name: String, data: &str, id: Option<String>) -> Result<()> {
    let event = build_event(name, data, id)?;
    let ids = client.send(&[event]).await?;
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

fn build_messages(prompt: String, system: Option<String>) -> Vec<Message> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(Message::system(system));
    }
    messages.push(Message::user(prompt));
    messages
}

fn build_event(name: String, data: &str, id: Option<String>) -> Result<Event> {
    let data: serde_json::Value = serde_json::from_str(data)
        .map_err(|e| SignalEdgeError::Other(format!("--data is not valid JSON: {e}")))?;
    if !data.is_object() {
        return Err(SignalEdgeError::Other(
            "--data must be a JSON object".to_string(),
        ));
    }
    let event = Event::new(name, data);
    Ok(match id {
        Some(id) => event.with_id(id),
        None => event,
    })
}
