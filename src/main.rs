#[tokio::main]
async fn main() {
    if let Err(e) = nurture_lib::run().await {
        eprintln!("nurture: {e}");
        std::process::exit(1);
    }
}
