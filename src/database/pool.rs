use crate::config::{DatabaseConfig, DatabaseEndpoint};
use crate::error::Result;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;

pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    let options = match &config.endpoint {
        DatabaseEndpoint::Url(url) => return Ok(PgConnectOptions::from_str(url)?),
        DatabaseEndpoint::Tcp { host, port } => PgConnectOptions::new().host(host).port(*port),
        DatabaseEndpoint::Socket(dir) => PgConnectOptions::new().socket(dir),
    };

    let options = options
        .username(&config.user)
        .password(&config.password)
        .database(&config.name);

    if config.require_tls {
        Ok(options.ssl_mode(PgSslMode::Require))
    } else {
        Ok(options)
    }
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect_with(connect_options(config)?)
        .await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use std::path::PathBuf;

    fn database(endpoint: DatabaseEndpoint, require_tls: bool) -> DatabaseConfig {
        DatabaseConfig {
            backend: StorageBackend::Postgres,
            endpoint,
            user: "devfest_user".to_string(),
            password: "secret".to_string(),
            name: "devfest_db".to_string(),
            max_connections: 5,
            require_tls,
        }
    }

    #[test]
    fn tcp_options_carry_credentials_and_tls() {
        let config = database(
            DatabaseEndpoint::Tcp {
                host: "10.0.0.5".to_string(),
                port: 6543,
            },
            true,
        );
        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "10.0.0.5");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "devfest_user");
        assert_eq!(options.get_database(), Some("devfest_db"));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));
    }

    #[test]
    fn socket_options_point_at_the_directory() {
        let dir = PathBuf::from("/cloudsql/project:region:instance");
        let config = database(DatabaseEndpoint::Socket(dir.clone()), false);
        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_socket(), Some(&dir));
    }

    #[test]
    fn url_is_used_verbatim() {
        let config = database(
            DatabaseEndpoint::Url("postgres://alice:pw@db.internal:5433/apps".to_string()),
            false,
        );
        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "alice");
        assert_eq!(options.get_database(), Some("apps"));
    }
}
