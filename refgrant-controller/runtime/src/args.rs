use crate::{
    admission::Admission,
    index,
    k8s::{gateway, Client, Resource},
    metrics,
    GrantLister,
};
use anyhow::{bail, Result};
use clap::Parser;
use kube::runtime::watcher;
use prometheus_client::registry::Registry;
use tracing::{info_span, Instrument};

#[derive(Debug, Parser)]
#[clap(
    name = "refgrant",
    about = "Enforces ReferenceGrants on cross-namespace volume data sources"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "refgrant=info,warn",
        env = "REFGRANT_CONTROLLER_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    #[clap(flatten)]
    client: kubert::ClientArgs,

    #[clap(flatten)]
    server: kubert::ServerArgs,

    #[clap(flatten)]
    admin: kubert::AdminArgs,

    /// Rejects every claim whose data source lives in another namespace,
    /// regardless of ReferenceGrants.
    #[clap(long)]
    cross_namespace_data_sources_disabled: bool,
}

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            admin,
            client,
            log_level,
            log_format,
            server,
            cross_namespace_data_sources_disabled,
        } = self;

        // Build the grant index, which is the only state the admission
        // controller consults.
        let grant_index = index::Index::shared();

        let mut prom = <Registry>::default();
        let admission_metrics = metrics::register(&mut prom, grant_index.clone());
        let rt_metrics = kubert::RuntimeMetrics::register(prom.sub_registry_with_prefix("kube"));

        let mut runtime = kubert::Runtime::builder()
            .with_log(log_level, log_format)
            .with_metrics(rt_metrics)
            .with_admin(admin.into_builder().with_prometheus(prom))
            .with_client(client)
            .with_server(server)
            .build()
            .await?;

        if api_resource_exists::<gateway::ReferenceGrant>(&runtime.client()).await {
            let grants =
                runtime.watch_all::<gateway::ReferenceGrant>(watcher::Config::default());
            tokio::spawn(
                kubert::index::namespaced(grant_index.clone(), grants)
                    .instrument(info_span!("referencegrants")),
            );
        } else {
            tracing::warn!(
                "referencegrants.gateway.networking.k8s.io resource kind not found, skipping watches; \
                 cross-namespace data sources will be denied"
            );
        }

        let runtime = runtime.spawn_server(Admission::new(
            GrantLister::new(grant_index),
            admission_metrics,
            !cross_namespace_data_sources_disabled,
        ));

        // Block the main thread on the shutdown signal. Once it fires, wait for the background tasks to
        // complete before exiting.
        if runtime.run().await.is_err() {
            bail!("Aborted");
        }

        Ok(())
    }
}

async fn api_resource_exists<T>(client: &Client) -> bool
where
    T: Resource,
    T::DynamicType: Default,
{
    let dt = Default::default();
    client
        .list_api_group_resources(&T::api_version(&dt))
        .await
        .ok()
        .iter()
        .flat_map(|r| r.resources.iter())
        .any(|r| r.kind == T::kind(&dt))
}
