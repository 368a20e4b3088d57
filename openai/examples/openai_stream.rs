use futures_util::StreamExt;
use streamchat_openai::{
    Client, ConnectionConfig,
    types::chat::{ChatCompletionRequest, ChatMessage, ChatRole},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let connection = ConnectionConfig::from_env();
    let client = Client::new(&connection)?;

    let request = ChatCompletionRequest::builder()
        .model(connection.model())
        .messages(vec![ChatMessage {
            role: ChatRole::User,
            content: "Explain Rust in three sentences.".to_string(),
        }])
        .build();

    let mut stream = client.chat().create_stream(request).await?;

    while let Some(chunk_result) = stream.next().await {
        match chunk_result {
            Ok(chunk) => {
                if let Some(content) = chunk.delta_text() {
                    print!("{}", content);
                }
            }
            Err(e) => {
                eprintln!("\nError: {}", e);
                break;
            }
        }
    }
    println!();

    Ok(())
}
