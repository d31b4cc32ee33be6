//! HTTP server command
//!
//! Without a database URL the API runs on the in-memory store.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use freeins_server::auth::{self, AdminSeed, AuthConfig, SeedOutcome, TokenIssuer};
use freeins_server::models::LocaleSet;
use freeins_server::{run_server, AppState, ContentStore, CorsPolicy, MemoryStore, ServerConfig};

use super::connect_store;

/// Fallback secret used when JWT_SECRET is unset
const DEFAULT_JWT_SECRET: &str = "your-secret-key";

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Postgres URL; the in-memory store is used when absent
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// HS256 signing secret for admin tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Token lifetime in seconds (at most one year)
    #[arg(
        long,
        env = "TOKEN_TTL_SECS",
        default_value_t = 86_400,
        value_parser = clap::value_parser!(u64).range(1..=auth::MAX_TOKEN_TTL.as_secs())
    )]
    pub token_ttl_secs: u64,

    /// bcrypt work factor for new password hashes
    #[arg(long, env = "BCRYPT_COST", default_value_t = auth::DEFAULT_BCRYPT_COST)]
    pub bcrypt_cost: u32,

    /// Locales pages may be written in (comma separated)
    #[arg(
        long,
        env = "SUPPORTED_LOCALES",
        value_delimiter = ',',
        default_value = "zh,en,es,vi,id,fr,ms,ar"
    )]
    pub locales: Vec<String>,

    /// Allow any CORS origin; set to false to use --cors-origins
    #[arg(long, env = "CORS_PERMISSIVE", default_value_t = true, action = ArgAction::Set)]
    pub cors_permissive: bool,

    /// Allowed origins when CORS is not permissive (comma separated)
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub cors_origins: Vec<String>,

    /// Email of the admin account created at startup
    #[arg(long, env = "ADMIN_EMAIL", default_value = auth::bootstrap::DEFAULT_ADMIN_EMAIL)]
    pub admin_email: String,

    /// Password of the admin account created at startup
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true, default_value = auth::bootstrap::DEFAULT_ADMIN_PASSWORD)]
    pub admin_password: String,

    /// Display name of the admin account created at startup
    #[arg(long, env = "ADMIN_NAME", default_value = auth::bootstrap::DEFAULT_ADMIN_NAME)]
    pub admin_name: String,
}

impl ServeArgs {
    fn auth_config(&self) -> AuthConfig {
        let jwt_secret = match &self.jwt_secret {
            Some(secret) if !secret.is_empty() => secret.clone(),
            _ => {
                tracing::warn!("JWT_SECRET not set; using the built-in development secret");
                DEFAULT_JWT_SECRET.to_owned()
            }
        };

        AuthConfig {
            jwt_secret,
            token_ttl: Duration::from_secs(self.token_ttl_secs),
            bcrypt_cost: self.bcrypt_cost,
        }
    }

    fn cors_policy(&self) -> CorsPolicy {
        if self.cors_permissive {
            CorsPolicy::Permissive
        } else {
            CorsPolicy::Origins(
                self.cors_origins
                    .iter()
                    .map(|o| o.trim().to_owned())
                    .filter(|o| !o.is_empty())
                    .collect(),
            )
        }
    }

    fn admin_seed(&self) -> AdminSeed {
        AdminSeed {
            email: self.admin_email.clone(),
            password: self.admin_password.clone(),
            name: self.admin_name.clone(),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let auth_config = args.auth_config();
    let locales = LocaleSet::new(&args.locales).context("Invalid SUPPORTED_LOCALES")?;

    let store: Arc<dyn ContentStore> = match &args.database_url {
        Some(url) => Arc::new(connect_store(url).await?),
        None => {
            tracing::warn!("DATABASE_URL not set; pages and users are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    match auth::seed_admin(store.as_ref(), &args.admin_seed(), auth_config.bcrypt_cost).await {
        Ok(SeedOutcome::Created(user)) => {
            tracing::info!(email = %user.email, "Admin user created");
        }
        Ok(SeedOutcome::AlreadyPresent) => {}
        Err(e) => tracing::error!(error = %e, "Error initializing admin user"),
    }

    let state = Arc::new(AppState {
        store,
        tokens: TokenIssuer::from_config(&auth_config),
        locales,
    });

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        cors: args.cors_policy(),
    };

    tracing::info!("Starting freeins API on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    fn parse(args: &[&str]) -> ServeArgs {
        let mut argv = vec!["freeins"];
        argv.extend_from_slice(args);
        Harness::parse_from(argv).serve
    }

    #[test]
    fn explicit_origins_disable_permissive_cors() {
        let args = parse(&[
            "--cors-permissive",
            "false",
            "--cors-origins",
            "https://freeins.example, http://localhost:3000",
        ]);
        assert_eq!(
            args.cors_policy(),
            CorsPolicy::Origins(vec![
                "https://freeins.example".into(),
                "http://localhost:3000".into()
            ])
        );
    }

    #[test]
    fn explicit_secret_and_ttl() {
        let args = parse(&["--jwt-secret", "s3cret", "--token-ttl-secs", "60"]);
        let config = args.auth_config();
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.token_ttl, Duration::from_secs(60));
    }

    #[test]
    fn ttl_outside_range_is_rejected() {
        for ttl in ["0", "9223372036854775807", "18446744073709551615"] {
            let argv = ["harness", "--token-ttl-secs", ttl];
            assert!(Harness::try_parse_from(argv).is_err(), "{ttl}");
        }
    }
}
