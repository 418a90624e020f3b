use aws_config::{BehaviorVersion, ConfigLoader, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;

use crate::config::{CredentialSource, PaluConfig};

/// SDK config for the configured region and credential source.
pub async fn sdk_config(config: &PaluConfig) -> SdkConfig {
    let loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
    with_credentials(loader, &config.credentials).load().await
}

fn with_credentials(loader: ConfigLoader, source: &CredentialSource) -> ConfigLoader {
    match source {
        CredentialSource::Inline {
            access_key_id,
            secret_access_key,
            session_token,
        } => loader.credentials_provider(Credentials::new(
            access_key_id,
            secret_access_key,
            session_token.clone(),
            None,
            "palu-config",
        )),
        CredentialSource::Profile { profile_name } => loader.profile_name(profile_name),
        CredentialSource::DefaultChain => loader,
    }
}
