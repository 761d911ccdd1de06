use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use servicehub::servicehub_auth::{JwtConfig, TokenIssuer, TokenVerifier};
use servicehub::servicehub_core::Role;
use servicehub::servicehub_observability::init_basic_console_logging;

#[derive(Parser)]
#[command(name = "servicehub-cli")]
#[command(about = "ServiceHub CLI - Token tools for operators", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue an access token signed with JWT_SECRET
    IssueToken {
        /// Subject (user id) to embed in the token
        #[arg(short = 's', long)]
        subject: String,

        /// Role claim: `user` (customer) or `provider`
        #[arg(short = 'r', long, default_value = "user")]
        role: Role,

        /// Also print a refresh token
        #[arg(long)]
        with_refresh: bool,
    },
    /// Verify an access token and print its identity claims
    VerifyToken {
        token: String,
    },
}

fn main() {
    dotenv().ok();
    init_basic_console_logging();

    let cli = Cli::parse();

    let jwt_config = match JwtConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::IssueToken {
            subject,
            role,
            with_refresh,
        } => handle_issue_token(&jwt_config, &subject, role, with_refresh),
        Commands::VerifyToken { token } => handle_verify_token(&jwt_config, &token),
    }
}

fn handle_issue_token(jwt_config: &JwtConfig, subject: &str, role: Role, with_refresh: bool) {
    let issuer = TokenIssuer::new(jwt_config);

    let result = if with_refresh {
        issuer.issue_pair(subject, role).map(|pair| {
            println!("access:  {}", pair.access_token);
            println!("refresh: {}", pair.refresh_token);
        })
    } else {
        issuer
            .issue_access_token(subject, role)
            .map(|token| println!("{token}"))
    };

    if let Err(e) = result {
        eprintln!("❌ Error issuing token: {}", e.error);
        std::process::exit(1);
    }
}

fn handle_verify_token(jwt_config: &JwtConfig, token: &str) {
    match TokenVerifier::new(jwt_config).verify(token) {
        Ok(identity) => {
            let expires_at = Utc
                .timestamp_opt(identity.expires_at(), 0)
                .single()
                .map(|at| at.to_rfc3339())
                .unwrap_or_else(|| identity.expires_at().to_string());

            println!("✅ Token is valid");
            println!("   Subject: {}", identity.subject());
            println!("   Role: {}", identity.role());
            println!("   Expires: {expires_at}");
        }
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}
