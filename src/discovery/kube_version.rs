use crate::models::KubeVersion;
use crate::utils::command_stdout;
use crate::utils::version::parse_component_version;
use tracing::debug;

/// Ask kubectl for the client and server versions.
///
/// Returns `None` if kubectl can't be run or prints no version at all.
pub fn get_kube_version() -> Option<KubeVersion> {
    let output = match command_stdout("kubectl", &["version"]) {
        Ok(out) => out,
        Err(e) => {
            debug!("Failed to run kubectl version: {}", e);
            return None;
        }
    };

    parse_kube_version(&output)
}

/// Parse the output of `kubectl version` into "major.minor" strings
pub fn parse_kube_version(output: &str) -> Option<KubeVersion> {
    let version = |kind: &str| {
        parse_component_version(kind, output).map(|(major, minor)| format!("{}.{}", major, minor))
    };

    let client = version("Client");
    let server = version("Server");
    if client.is_none() && server.is_none() {
        debug!("No version found in kubectl output '{}'", output.trim());
        return None;
    }

    Some(KubeVersion {
        client,
        server,
        raw: output.to_string(),
    })
}
