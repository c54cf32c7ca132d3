use sx_url_generator::command_line::command_line_usage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    command_line_usage().await
}
