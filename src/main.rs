// Thin delegating binary.
//
// The actual server assembly lives in the extracted `swagger-server` crate; this
// binary documents the demo registries.
#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    swagger_server::run(resource_swagger::demo::catalog()).await
}
