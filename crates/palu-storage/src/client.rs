use aws_sdk_s3::Client;

/// Build an S3 client with a specific region.
pub async fn build_client_with_region(region: &str) -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;
    Client::new(&config)
}

/// Build an S3 client from an already loaded SDK config.
pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Client {
    Client::new(config)
}
