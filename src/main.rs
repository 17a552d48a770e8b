#[actix_web::main]
async fn main() -> std::io::Result<()> {
    lightning_road_server::run().await
}
