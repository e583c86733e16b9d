use logview::app;
use logview::error::ViewerError;

#[tokio::main]
async fn main() -> Result<(), ViewerError> {
    app::run().await
}
