#[tokio::main]
async fn main() {
    translations::start_server().await;
}
