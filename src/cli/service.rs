//! `service` subcommands

use clap::Subcommand;

use crate::config::{Config, ConfigLoader, ProfileConfig};
use crate::error::ServiceListError;
use crate::kube::{self, HostStatus, KubeHostStatus};
use crate::service::{
    DisplayRow, KubeServiceResolver, NamespaceScope, OutputFormat, PlatformContext,
    ServiceResolver, UrlSuppression, UrlTemplate, present, render,
};

/// Service subcommands
#[derive(Subcommand, Debug)]
pub enum ServiceSubcommand {
    /// Lists the URLs for the services in your local cluster
    List {
        /// The services namespace (all namespaces when omitted or empty)
        #[arg(short = 'n', long)]
        namespace: Option<String>,

        /// Format of node port URLs, e.g. "https://{{.IP}}:{{.Port}}"
        #[arg(long)]
        format: Option<String>,

        /// Output format
        #[arg(short = 'o', long, value_enum)]
        output: Option<OutputFormat>,
    },
}

/// Everything `list_services` needs besides its collaborators
pub struct ListRequest<'a> {
    pub profile: &'a str,
    /// Machine name of the profile's primary control plane
    pub machine: &'a str,
    pub scope: NamespaceScope,
    pub template: UrlTemplate,
    pub platform: PlatformContext,
    pub suppression: &'a dyn UrlSuppression,
}

/// Check the host, resolve service URLs and build display rows
///
/// Rows are only built once the host is running and resolution succeeded.
pub async fn list_services(
    host: &dyn HostStatus,
    resolver: &dyn ServiceResolver,
    request: &ListRequest<'_>,
) -> Result<Vec<DisplayRow>, ServiceListError> {
    let running = host
        .is_host_running(request.machine)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Host status check for {} failed: {:#}", request.machine, e);
            false
        });
    if !running {
        return Err(ServiceListError::HostNotRunning(request.profile.to_string()));
    }

    let resolved = resolver
        .resolve(&request.scope, &request.template)
        .await
        .map_err(|e| ServiceListError::Resolve(format!("{:#}", e)))?;
    tracing::debug!(
        "Resolved {} services for {:?} on {:?}",
        resolved.len(),
        request.scope,
        request.platform
    );

    Ok(present(&resolved, &request.platform, request.suppression))
}

/// Settings for one `service list` run after flags are applied over config
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    pub profile_name: String,
    pub profile: ProfileConfig,
    pub scope: NamespaceScope,
    pub template: UrlTemplate,
    pub output: OutputFormat,
}

/// Resolve command line flags against the loaded configuration
///
/// A flag that is given always wins over the matching config value.
pub fn build_options(
    config: &Config,
    profile_override: Option<&str>,
    namespace: Option<&str>,
    format: Option<&str>,
    output: Option<OutputFormat>,
) -> Result<ListOptions, ServiceListError> {
    let profile_name = profile_override.unwrap_or(&config.profile);
    let profile = config
        .profile(profile_name)
        .ok_or_else(|| ServiceListError::ProfileNotFound(profile_name.to_string()))?;

    let template = UrlTemplate::parse(format.unwrap_or(&config.url_format))
        .map_err(|e| ServiceListError::Template(e.to_string()))?;

    Ok(ListOptions {
        profile_name: profile_name.to_string(),
        profile: profile.clone(),
        scope: NamespaceScope::from_flag(namespace.unwrap_or(&config.default_namespace)),
        template,
        output: output.unwrap_or(config.output),
    })
}

/// Handle service subcommands for the given profile override
pub async fn handle_service_command(
    cmd: ServiceSubcommand,
    profile_override: Option<&str>,
) -> Result<(), ServiceListError> {
    let ServiceSubcommand::List {
        namespace,
        format,
        output,
    } = cmd;

    let config = ConfigLoader::load().map_err(|e| ServiceListError::Config(format!("{:#}", e)))?;
    let options = build_options(
        &config,
        profile_override,
        namespace.as_deref(),
        format.as_deref(),
        output,
    )?;
    let suppression = config.suppression_rules();
    let profile_name = options.profile_name.as_str();
    let machine = options.profile.machine_name(profile_name);

    let client = kube::create_client_for_context(options.profile.context_name(profile_name))
        .await
        .map_err(|e| ServiceListError::Client(format!("{:#}", e)))?;
    let host = KubeHostStatus::new(client.clone());
    let resolver = KubeServiceResolver::new(client, machine, options.profile.node_ip.clone());

    let request = ListRequest {
        profile: profile_name,
        machine,
        scope: options.scope.clone(),
        template: options.template.clone(),
        platform: PlatformContext::current(&options.profile.driver),
        suppression: &suppression,
    };
    let rows = list_services(&host, &resolver, &request).await?;

    let rendered =
        render(&rows, options.output).map_err(|e| ServiceListError::Render(format!("{:#}", e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Print a command error and its follow-up notice to stderr
pub fn report_service_error(err: &ServiceListError) {
    eprintln!("✗ {}", err);
    if let Some(notice) = err.notice() {
        eprintln!("  {}", notice);
    }
}
