// Account commands: register, login, profile

use crate::client::Client;
use crate::output::{print_field, OutputFormat};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Token response from register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

/// Profile response from API
#[derive(Debug, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

pub async fn register(
    client: &Client,
    output: OutputFormat,
    quiet: bool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    let response: TokenResponse = client
        .post_public(
            "/auth/register/",
            &RegisterRequest {
                username,
                email,
                password,
            },
        )
        .await?;

    print_token(output, quiet, &response)
}

pub async fn login(
    client: &Client,
    output: OutputFormat,
    quiet: bool,
    username: &str,
    password: &str,
) -> Result<()> {
    let response: TokenResponse = client
        .post_public("/auth/login/", &LoginRequest { username, password })
        .await?;

    print_token(output, quiet, &response)
}

pub async fn profile(client: &Client, output: OutputFormat) -> Result<()> {
    let profile: Profile = client.get("/profile/").await?;

    if output.is_text() {
        print_field("Name", &profile.name);
        print_field("Email", &profile.email);
        print_field("Avatar", &profile.avatar);
    } else {
        output.print_value(&profile)?;
    }

    Ok(())
}

fn print_token(output: OutputFormat, quiet: bool, response: &TokenResponse) -> Result<()> {
    if !output.is_text() {
        return output.print_value(response);
    }

    if quiet {
        println!("{}", response.token);
    } else {
        println!("{}", response.message);
        print_field("Token", &response.token);
        println!();
        println!("Use it with: export NOTEKEEP_TOKEN={}", response.token);
    }
    Ok(())
}
