// # gandi-dnsctl - One-shot Gandi DNS reconciliation CLI
//
// This binary is a THIN integration layer:
// 1. Reading desired state from environment variables
// 2. Initializing the runtime and logging
// 3. Registering record providers
// 4. Running a single reconciliation and reporting the result
//
// All reconciliation logic lives in gandi-dns-core; all lexicon subprocess
// plumbing lives in gandi-dns-provider-lexicon.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Desired record
// - `GANDI_DNS_DOMAIN`: The fully-qualified domain name (required)
// - `GANDI_DNS_IPV4`: The IPv4 address the domain refers to (required)
// - `GANDI_DNS_STATE`: Desired state, `present` or `absent` (required)
//
// ### Credentials
// - `GANDI_DNS_API_TOKEN`: Gandi REST API key. Falls back to
//   `LEXICON_GANDI_AUTH_TOKEN` for compatibility with lexicon itself.
//
// ### Provider
// - `GANDI_DNS_LEXICON_BIN`: Override of the lexicon binary path (optional)
//
// ### Logging
// - `GANDI_DNS_LOG_LEVEL`: trace|debug|info|warn|error (default: info)
//
// ## Output
//
// On success a single JSON object is printed on stdout:
//
// ```json
// {"changed": true}
// ```
//
// ## Example
//
// ```bash
// export GANDI_DNS_DOMAIN=foobar.autonomic.zone
// export GANDI_DNS_IPV4=192.168.1.2
// export GANDI_DNS_STATE=present
// export GANDI_DNS_API_TOKEN=your_token
//
// gandi-dnsctl
// ```

use anyhow::Result;
use gandi_dns_core::{DesiredRecord, ProviderConfig, ProviderRegistry, Reconciler, RecordState};
use std::env;
use std::net::Ipv4Addr;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Reconciliation completed (changed or unchanged)
/// - 1: Configuration or startup error
/// - 2: Provider or runtime error
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    /// Reconciliation completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Provider or runtime error
    RuntimeError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    domain: String,
    ipv4: Ipv4Addr,
    state: RecordState,
    api_token: String,
    lexicon_bin: Option<String>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// The credential fallback chain lives here at the caller boundary;
    /// the core and provider only ever see an explicit token.
    fn from_env() -> Result<Self> {
        let domain = env::var("GANDI_DNS_DOMAIN")
            .map_err(|_| anyhow::anyhow!("GANDI_DNS_DOMAIN is required"))?;

        let ipv4 = env::var("GANDI_DNS_IPV4")
            .map_err(|_| anyhow::anyhow!("GANDI_DNS_IPV4 is required"))?
            .parse::<Ipv4Addr>()
            .map_err(|e| anyhow::anyhow!("GANDI_DNS_IPV4 is not a valid IPv4 address: {}", e))?;

        let state = env::var("GANDI_DNS_STATE")
            .map_err(|_| {
                anyhow::anyhow!("GANDI_DNS_STATE is required (present or absent)")
            })?
            .parse::<RecordState>()
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        let api_token = env::var("GANDI_DNS_API_TOKEN")
            .or_else(|_| env::var("LEXICON_GANDI_AUTH_TOKEN"))
            .map_err(|_| {
                anyhow::anyhow!(
                    "A Gandi API token is required. Set it via: \
                     export GANDI_DNS_API_TOKEN=your_token \
                     (or LEXICON_GANDI_AUTH_TOKEN)"
                )
            })?;

        Ok(Self {
            domain,
            ipv4,
            state,
            api_token,
            lexicon_bin: env::var("GANDI_DNS_LEXICON_BIN").ok(),
            log_level: env::var("GANDI_DNS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// Catches configuration mistakes before any subprocess is spawned:
    /// - Domain name shape (RFC 1035 label checks)
    /// - Token presence and obvious placeholder values
    /// - Log level enumeration
    fn validate(&self) -> Result<()> {
        gandi_dns_core::config::validate_domain_name(&self.domain)
            .map_err(|e| anyhow::anyhow!("GANDI_DNS_DOMAIN: {}", e))?;

        if self.api_token.is_empty() {
            anyhow::bail!(
                "Gandi API token cannot be empty. \
                Set it via: export GANDI_DNS_API_TOKEN=your_token"
            );
        }

        // Check for obvious placeholder tokens (common mistake)
        let token_lower = self.api_token.to_lowercase();
        if token_lower.contains("your_token")
            || token_lower.contains("replace_me")
            || token_lower.contains("example")
            || token_lower == "token"
        {
            anyhow::bail!(
                "GANDI_DNS_API_TOKEN appears to be a placeholder. \
                Use an actual API key from the Gandi admin panel."
            );
        }

        if let Some(ref bin) = self.lexicon_bin
            && bin.is_empty()
        {
            anyhow::bail!("GANDI_DNS_LEXICON_BIN cannot be empty when set");
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "GANDI_DNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Build the desired record from the validated configuration
    fn desired_record(&self) -> Result<DesiredRecord> {
        Ok(DesiredRecord::new(
            self.domain.clone(),
            self.ipv4,
            self.state,
        )?)
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(config).await {
            Ok(()) => CtlExitCode::Success,
            Err(e) => {
                error!("Reconciliation failed: {}", e);
                CtlExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Run one reconciliation and print the changed/unchanged report
async fn run(config: Config) -> Result<()> {
    let registry = ProviderRegistry::new();

    #[cfg(feature = "lexicon")]
    {
        info!("Registering lexicon provider");
        gandi_dns_provider_lexicon::register(&registry);
    }

    let provider_config = ProviderConfig::Lexicon {
        api_token: config.api_token.clone(),
        command: config.lexicon_bin.clone(),
    };

    let provider = registry.create_provider(&provider_config)?;
    let desired = config.desired_record()?;

    info!(
        "Reconciling {} ({:?}) via {}",
        desired.domain,
        desired.state,
        provider.provider_name()
    );

    let reconciler = Reconciler::new(provider);
    let outcome = reconciler.reconcile(&desired).await?;

    info!(
        "Reconciliation of {} finished: changed={}",
        desired.domain,
        outcome.changed()
    );

    // The caller boundary: one JSON object on stdout
    println!(
        "{}",
        serde_json::json!({ "changed": outcome.changed() })
    );

    Ok(())
}
