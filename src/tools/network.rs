//! Network tools: interfaces, reachability, WiFi status
//!
//! Reachability probes a small fixed set of well-known DNS endpoints with a
//! short timeout and stops at the first success. WiFi status tries
//! NetworkManager first and falls back to iwconfig for minimal systems.

use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

use super::args::ToolArgs;
use super::context::ToolContext;
use super::probe::run_probe;
use super::registry::RegistryBuilder;
use super::schema::ToolSchema;

/// Well-known DNS endpoints used for reachability checks
const PROBE_HOSTS: &[(&str, &str)] = &[
    ("8.8.8.8:53", "Google DNS"),
    ("1.1.1.1:53", "Cloudflare DNS"),
    ("208.67.222.222:53", "OpenDNS"),
];

/// Register all network tools, in fixed order
pub fn register(builder: &mut RegistryBuilder) {
    builder.register(
        ToolSchema::new(
            "get_network_info",
            "Get network interfaces and IP addresses.",
            vec![],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(get_network_info(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "check_internet",
            "Check if internet connection is working.",
            vec![],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(check_internet(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "get_wifi_info",
            "Get WiFi network name, signal strength, and security type.",
            vec![],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(get_wifi_info(args, ctx))),
    );
}

async fn get_network_info(_args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let mut out = String::from("Network Information:\n");
    let mut found_any = false;

    // `ip -o` gives one interface per line, easy to scrape
    if let Some(raw) = run_probe("ip", &["-o", "-4", "addr", "show"], ctx.subprocess_timeout).await
    {
        for line in raw.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            // Format: "2: wlan0 inet 192.168.1.10/24 brd ..."
            let (Some(iface), Some(addr)) = (fields.get(1), fields.get(3)) else {
                continue;
            };
            if *iface == "lo" {
                continue;
            }
            let address = addr.split('/').next().unwrap_or(addr);
            out.push_str(&format!("{iface}: {address}\n"));
            found_any = true;
        }
    }
    if !found_any {
        out.push_str("No active network interfaces found.\n");
    }

    if let Some(primary) = primary_ip() {
        out.push_str(&format!("Primary IP: {primary}"));
    }
    Ok(out.trim_end().to_string())
}

/// The address the OS would route internet traffic from. Connecting a UDP
/// socket sends no packets; it just asks the kernel for a route.
fn primary_ip() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip().to_string())
}

async fn check_internet(_args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    for (endpoint, name) in PROBE_HOSTS {
        let Ok(addr) = endpoint.parse::<SocketAddr>() else {
            continue;
        };
        let connect = tokio::net::TcpStream::connect(addr);
        match tokio::time::timeout(ctx.network_timeout, connect).await {
            Ok(Ok(_stream)) => {
                return Ok(format!("Internet is connected. Successfully reached {name}."));
            }
            Ok(Err(err)) => debug!(endpoint, error = %err, "probe failed"),
            Err(_) => debug!(endpoint, "probe timed out"),
        }
    }
    Ok("No internet connection detected. Could not reach any DNS servers.".to_string())
}

async fn get_wifi_info(_args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    if let Some(info) = wifi_via_nmcli(&ctx).await {
        return Ok(info);
    }
    if let Some(info) = wifi_via_iwconfig(&ctx).await {
        return Ok(info);
    }
    Ok("Could not determine WiFi status. NetworkManager or iw tools not available.".to_string())
}

/// NetworkManager path: terse output, one network per line,
/// `ACTIVE:SSID:SIGNAL:SECURITY`
async fn wifi_via_nmcli(ctx: &ToolContext) -> Option<String> {
    let raw = run_probe(
        "nmcli",
        &["-t", "-f", "ACTIVE,SSID,SIGNAL,SECURITY", "device", "wifi"],
        ctx.subprocess_timeout,
    )
    .await?;

    for line in raw.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() >= 4 && fields[0] == "yes" {
            let ssid = if fields[1].is_empty() { "Hidden Network" } else { fields[1] };
            let signal = if fields[2].is_empty() { "Unknown" } else { fields[2] };
            let security = if fields[3].is_empty() { "Open" } else { fields[3] };
            return Some(format!(
                "WiFi Connected: {ssid}\nSignal Strength: {signal}%\nSecurity: {security}"
            ));
        }
    }
    Some("WiFi available but not connected to any network.".to_string())
}

/// Fallback for systems without NetworkManager
async fn wifi_via_iwconfig(ctx: &ToolContext) -> Option<String> {
    let raw = run_probe("iwconfig", &[], ctx.subprocess_timeout).await?;
    raw.lines()
        .find(|line| line.contains("ESSID"))
        .map(|line| format!("WiFi: {}", line.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_endpoints_parse() {
        for (endpoint, _name) in PROBE_HOSTS {
            assert!(endpoint.parse::<SocketAddr>().is_ok(), "{endpoint}");
        }
    }
}
