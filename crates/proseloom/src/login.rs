// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The login command: derive the access key and fetch an access token.

use proseloom_config::ProseloomConfig;
use proseloom_core::ProseloomError;
use proseloom_novelai::GenerationClient;
use secrecy::SecretString;

pub async fn run(
    config: &ProseloomConfig,
    email_flag: Option<String>,
) -> Result<(), ProseloomError> {
    let email = email_flag
        .or_else(|| config.account.email.clone())
        .ok_or_else(|| {
            ProseloomError::Config(
                "no email given; pass --email or set account.email".to_string(),
            )
        })?;

    let password = rpassword::prompt_password("Password: ").map_err(|e| {
        ProseloomError::Storage {
            source: Box::new(e),
        }
    })?;
    let password = SecretString::from(password);

    let client = GenerationClient::new(String::new())?;
    let token = client.login(&email, &password).await?;

    println!("{token}");
    eprintln!("Store this as account.api_key in proseloom.toml");
    Ok(())
}
