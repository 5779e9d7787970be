// # dns-lexicon Record Provider
//
// This crate provides a RecordProvider implementation that drives the
// third-party `lexicon` command-line tool against the Gandi REST API.
//
// ## Invocation
//
// - List:   `lexicon gandi list <domain> A --output JSON`
// - Create: `lexicon gandi create <domain> A --name <domain> --content <ip> --output JSON`
// - Delete: `lexicon gandi delete <domain> A --name <domain> --content <ip> --output JSON`
//
// The subprocess environment carries `PROVIDER=gandi`,
// `LEXICON_GANDI_API_PROTOCOL=rest`, and `LEXICON_GANDI_AUTH_TOKEN` with the
// configured API token. The token is explicit constructor configuration and
// is never read from the provider's own process environment.
//
// ## Constraints
//
// - One subprocess per trait method invocation
// - NO retry logic (failures are fatal to the invocation)
// - NO caching of provider state
// - NO background tasks
//
// ## Security Requirements
//
// - The API token NEVER appears in logs or Debug output
// - Construction MUST fail fast on an empty token

use async_trait::async_trait;
use gandi_dns_core::config::ProviderConfig;
use gandi_dns_core::traits::{ExistingRecord, RecordProvider, RecordProviderFactory};
use gandi_dns_core::{Error, Result};
use tokio::process::Command;

/// Default name of the lexicon binary, resolved via PATH
const DEFAULT_COMMAND: &str = "lexicon";

/// Provider selector passed to lexicon
const LEXICON_PROVIDER_ENV: (&str, &str) = ("PROVIDER", "gandi");

/// Gandi API flavor; the XML-RPC protocol is long deprecated
const LEXICON_PROTOCOL_ENV: (&str, &str) = ("LEXICON_GANDI_API_PROTOCOL", "rest");

/// Environment variable lexicon reads the Gandi credential from
const LEXICON_TOKEN_ENV: &str = "LEXICON_GANDI_AUTH_TOKEN";

/// Record provider backed by the `lexicon` CLI
///
/// # Credential Handling
///
/// The Gandi API token is passed in at construction and forwarded to the
/// subprocess environment. It is never logged; the Debug implementation
/// redacts it.
pub struct LexiconProvider {
    /// Gandi REST API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// Binary to invoke (overridable for testing)
    command: String,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for LexiconProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconProvider")
            .field("api_token", &"<REDACTED>")
            .field("command", &self.command)
            .finish()
    }
}

impl LexiconProvider {
    /// Create a new lexicon provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Gandi REST API key
    /// - `command`: Optional override of the lexicon binary path
    ///
    /// # Errors
    ///
    /// Fails if the token is empty.
    pub fn new(api_token: impl Into<String>, command: Option<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Gandi API token cannot be empty"));
        }

        Ok(Self {
            api_token,
            command: command.unwrap_or_else(|| DEFAULT_COMMAND.to_string()),
        })
    }

    /// Remediation hint for failed lexicon invocations
    ///
    /// The CLI's own failure output is rarely helpful, so every provider
    /// error carries a reproduction command for the operator.
    fn remediation_hint(domain: &str) -> String {
        format!(
            "unable to operate on domain records. Is the Gandi API token valid? \
             Does running the following command work? lexicon gandi list {} A",
            domain
        )
    }

    fn list_args(domain: &str) -> Vec<String> {
        vec![
            "gandi".to_string(),
            "list".to_string(),
            domain.to_string(),
            "A".to_string(),
            "--output".to_string(),
            "JSON".to_string(),
        ]
    }

    fn mutate_args(action: &str, domain: &str, record_type: &str, content: &str) -> Vec<String> {
        vec![
            "gandi".to_string(),
            action.to_string(),
            domain.to_string(),
            record_type.to_string(),
            "--name".to_string(),
            domain.to_string(),
            "--content".to_string(),
            content.to_string(),
            "--output".to_string(),
            "JSON".to_string(),
        ]
    }

    /// Run one lexicon invocation and return its stdout
    ///
    /// # Failure Mapping
    ///
    /// - Binary missing → `ProviderUnavailable` with an install hint
    /// - Other spawn failure → `ProviderUnavailable`
    /// - Non-zero exit → `Provider` error with domain, operation, and hint
    async fn run(&self, operation: &str, domain: &str, args: &[String]) -> Result<Vec<u8>> {
        tracing::debug!(
            "Running {} {} for {} (output: JSON)",
            self.command,
            operation,
            domain
        );

        let output = Command::new(&self.command)
            .args(args)
            .env(LEXICON_PROVIDER_ENV.0, LEXICON_PROVIDER_ENV.1)
            .env(LEXICON_PROTOCOL_ENV.0, LEXICON_PROTOCOL_ENV.1)
            .env(LEXICON_TOKEN_ENV, &self.api_token)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::unavailable(format!(
                    "'{}' not found on PATH. Install dns-lexicon (e.g. apt install \
                     python3-lexicon or pip install dns-lexicon) and retry",
                    self.command
                )),
                _ => Error::unavailable(format!(
                    "failed to spawn '{}' for {} on {}: {}",
                    self.command, operation, domain, e
                )),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                "lexicon {} for {} exited with {}: {}",
                operation,
                domain,
                output.status,
                stderr.trim()
            );
            return Err(Error::provider(
                "lexicon",
                operation,
                domain,
                Self::remediation_hint(domain),
            ));
        }

        Ok(output.stdout)
    }

    /// Parse the JSON array lexicon prints for a list invocation
    fn parse_records(stdout: &[u8]) -> Result<Vec<ExistingRecord>> {
        serde_json::from_slice(stdout).map_err(|e| {
            Error::malformed(format!(
                "lexicon list output is not a JSON record array: {}",
                e
            ))
        })
    }

    /// Validate that a mutating invocation printed JSON at all
    ///
    /// Create/delete output is a JSON boolean or record blob; the value is
    /// not consulted, but unparseable output means the CLI misbehaved.
    fn check_mutation_output(operation: &str, stdout: &[u8]) -> Result<()> {
        serde_json::from_slice::<serde_json::Value>(stdout)
            .map(|_| ())
            .map_err(|e| {
                Error::malformed(format!("lexicon {} output is not JSON: {}", operation, e))
            })
    }
}

#[async_trait]
impl RecordProvider for LexiconProvider {
    async fn list(&self, domain: &str) -> Result<Vec<ExistingRecord>> {
        let stdout = self.run("list", domain, &Self::list_args(domain)).await?;
        let records = Self::parse_records(&stdout)?;
        tracing::debug!("lexicon lists {} record(s) for {}", records.len(), domain);
        Ok(records)
    }

    async fn create(&self, domain: &str, record_type: &str, content: &str) -> Result<()> {
        let args = Self::mutate_args("create", domain, record_type, content);
        let stdout = self.run("create", domain, &args).await?;
        Self::check_mutation_output("create", &stdout)?;
        tracing::info!("lexicon created {} {} -> {}", record_type, domain, content);
        Ok(())
    }

    async fn delete(&self, domain: &str, record_type: &str, content: &str) -> Result<()> {
        let args = Self::mutate_args("delete", domain, record_type, content);
        let stdout = self.run("delete", domain, &args).await?;
        Self::check_mutation_output("delete", &stdout)?;
        tracing::info!("lexicon deleted {} {}", record_type, domain);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "lexicon"
    }
}

/// Factory for creating lexicon providers
pub struct LexiconFactory;

impl RecordProviderFactory for LexiconFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn RecordProvider>> {
        match config {
            ProviderConfig::Lexicon { api_token, command } => {
                if api_token.is_empty() {
                    return Err(Error::config("Gandi API token is required"));
                }

                Ok(Box::new(LexiconProvider::new(
                    api_token.clone(),
                    command.clone(),
                )?))
            }
            _ => Err(Error::config("Invalid config for lexicon provider")),
        }
    }
}

/// Register the lexicon provider with a registry
///
/// This function should be called during initialization to make the
/// lexicon provider available.
///
/// # Example
///
/// ```rust
/// use gandi_dns_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// gandi_dns_provider_lexicon::register(&registry);
/// ```
pub fn register(registry: &gandi_dns_core::ProviderRegistry) {
    registry.register_provider("lexicon", Box::new(LexiconFactory));
}
