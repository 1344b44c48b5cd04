#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fitness_studio_booking::run().await
}
