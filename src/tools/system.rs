//! System telemetry tools: CPU, memory, disk, GPU, battery, processes
//!
//! Linux reads `/proc` and `/sys` directly; disk and GPU details come from
//! bounded subprocess probes. Every tool degrades to an explicit
//! "unavailable" sentence when the underlying facility is missing, so the
//! assistant can say so instead of crashing mid-conversation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

use super::args::ToolArgs;
use super::context::ToolContext;
use super::paths::expand_path;
use super::probe::run_probe;
use super::registry::RegistryBuilder;
use super::schema::{ParamSpec, ToolSchema};

/// Sampling interval for CPU usage percentages
const CPU_SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

const GIB: u64 = 1024 * 1024 * 1024;

const UNAVAILABLE: &str =
    "System monitoring unavailable on this platform. It requires a Linux /proc filesystem.";

/// Register all system tools, in fixed order
pub fn register(builder: &mut RegistryBuilder) {
    builder.register(
        ToolSchema::new(
            "get_system_stats",
            "Get overall system status including CPU, RAM, disk, and GPU usage. Good for \
             'how is my system doing' type questions.",
            vec![],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(get_system_stats(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "get_cpu_info",
            "Get CPU information including cores, frequency, and per-core usage.",
            vec![],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(get_cpu_info(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "get_memory_info",
            "Get RAM and swap memory usage details.",
            vec![],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(get_memory_info(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "get_disk_usage",
            "Get disk space usage for a given path. Defaults to root partition.",
            vec![ParamSpec::string("path", "Path to check disk usage for (default: /)")],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(get_disk_usage(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "get_gpu_info",
            "Get GPU information including VRAM usage, load, and temperature. Supports both \
             NVIDIA and AMD GPUs.",
            vec![],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(get_gpu_info(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "get_battery_status",
            "Get battery level and charging status. Works on laptops only.",
            vec![],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(get_battery_status(args, ctx))),
    );
    builder.register(
        ToolSchema::new(
            "list_processes",
            "List top processes by CPU or memory usage.",
            vec![
                ParamSpec::string("sort_by", "Sort by 'cpu' or 'memory' (default: cpu)")
                    .one_of(&["cpu", "memory"]),
                ParamSpec::integer("limit", "Number of processes to show (default: 5, max: 20)"),
            ],
            &[],
        ),
        Box::new(|args, ctx| Box::pin(list_processes(args, ctx))),
    );
}

// ---- /proc parsing ----

/// Parsed `/proc/meminfo` fields, in bytes
struct MemInfo {
    total: u64,
    available: u64,
    swap_total: u64,
    swap_free: u64,
}

impl MemInfo {
    fn read() -> Option<Self> {
        let raw = std::fs::read_to_string("/proc/meminfo").ok()?;
        let mut fields: HashMap<&str, u64> = HashMap::new();
        for line in raw.lines() {
            let mut parts = line.split_whitespace();
            let Some(key) = parts.next() else { continue };
            let Some(value) = parts.next().and_then(|v| v.parse::<u64>().ok()) else {
                continue;
            };
            // Values are reported in kB
            fields.insert(key.trim_end_matches(':'), value * 1024);
        }
        Some(Self {
            total: *fields.get("MemTotal")?,
            available: fields.get("MemAvailable").copied().unwrap_or(0),
            swap_total: fields.get("SwapTotal").copied().unwrap_or(0),
            swap_free: fields.get("SwapFree").copied().unwrap_or(0),
        })
    }

    fn used(&self) -> u64 {
        self.total.saturating_sub(self.available)
    }

    fn percent_used(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used() as f64 / self.total as f64 * 100.0
    }
}

/// One `/proc/stat` CPU line reduced to (busy, total) jiffies
#[derive(Clone, Copy)]
struct CpuTimes {
    busy: u64,
    total: u64,
}

/// Aggregate plus per-core jiffy counters
fn read_cpu_times() -> Option<(CpuTimes, Vec<CpuTimes>)> {
    let raw = std::fs::read_to_string("/proc/stat").ok()?;
    let mut aggregate = None;
    let mut cores = Vec::new();
    for line in raw.lines() {
        let mut parts = line.split_whitespace();
        let Some(label) = parts.next() else { continue };
        if !label.starts_with("cpu") {
            continue;
        }
        let values: Vec<u64> = parts.filter_map(|v| v.parse().ok()).collect();
        if values.len() < 4 {
            continue;
        }
        let total: u64 = values.iter().sum();
        // idle + iowait count as not-busy
        let idle = values[3] + values.get(4).copied().unwrap_or(0);
        let times = CpuTimes {
            busy: total.saturating_sub(idle),
            total,
        };
        if label == "cpu" {
            aggregate = Some(times);
        } else {
            cores.push(times);
        }
    }
    aggregate.map(|agg| (agg, cores))
}

fn percent_between(before: CpuTimes, after: CpuTimes) -> f64 {
    let total = after.total.saturating_sub(before.total);
    if total == 0 {
        return 0.0;
    }
    let busy = after.busy.saturating_sub(before.busy);
    busy as f64 / total as f64 * 100.0
}

/// Sample CPU usage over a short interval: (aggregate %, per-core %)
async fn sample_cpu_percent() -> Option<(f64, Vec<f64>)> {
    let (before_agg, before_cores) = read_cpu_times()?;
    tokio::time::sleep(CPU_SAMPLE_INTERVAL).await;
    let (after_agg, after_cores) = read_cpu_times()?;

    let per_core = before_cores
        .iter()
        .zip(after_cores.iter())
        .map(|(b, a)| percent_between(*b, *a))
        .collect();
    Some((percent_between(before_agg, after_agg), per_core))
}

// ---- tools ----

async fn get_system_stats(_args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let Some(memory) = MemInfo::read() else {
        return Ok(UNAVAILABLE.to_string());
    };
    let Some((cpu_percent, _)) = sample_cpu_percent().await else {
        return Ok(UNAVAILABLE.to_string());
    };

    let mut out = String::from("System Stats:\n");
    out.push_str(&format!("CPU Usage: {cpu_percent:.1}%\n"));
    out.push_str(&format!(
        "RAM: {:.1}% used ({}GB of {}GB)\n",
        memory.percent_used(),
        memory.used() / GIB,
        memory.total / GIB
    ));

    match disk_usage("/", &ctx).await {
        Some(disk) => out.push_str(&format!(
            "Disk: {:.1}% used ({}GB of {}GB free: {}GB)",
            disk.percent_used(),
            disk.used / GIB,
            disk.total / GIB,
            disk.available / GIB
        )),
        None => out.push_str("Disk: usage unavailable"),
    }

    // GPU summary line, NVIDIA first, then a hint for AMD
    if let Some(gpus) = nvidia_gpus(&ctx).await {
        if let Some(gpu) = gpus.first() {
            let vram = if gpu.vram_total_mb > 0.0 {
                gpu.vram_used_mb / gpu.vram_total_mb * 100.0
            } else {
                0.0
            };
            out.push_str(&format!("\nGPU: {} - {vram:.0}% VRAM used", gpu.name));
        }
    } else if amd_gpu_raw(&ctx).await.is_some() {
        out.push_str("\nAMD GPU detected (use get_gpu_info for details)");
    }

    Ok(out)
}

async fn get_cpu_info(_args: ToolArgs, _ctx: Arc<ToolContext>) -> Result<String> {
    let Some((_, per_core)) = sample_cpu_percent().await else {
        return Ok(UNAVAILABLE.to_string());
    };

    let logical = per_core.len();
    let physical = physical_core_count().unwrap_or(logical);

    let mut out = String::from("CPU Information:\n");
    out.push_str(&format!("Cores: {physical} physical, {logical} logical\n"));
    if let Some(current) = current_frequency_mhz() {
        match max_frequency_mhz() {
            Some(max) => {
                out.push_str(&format!("Frequency: {current:.0}MHz (max: {max:.0}MHz)\n"));
            }
            None => out.push_str(&format!("Frequency: {current:.0}MHz\n")),
        }
    }

    if per_core.len() <= 8 {
        let usage: Vec<String> = per_core.iter().map(|p| format!("{p:.1}%")).collect();
        out.push_str(&format!("Usage per core: {}", usage.join(", ")));
    } else {
        let avg = per_core.iter().sum::<f64>() / per_core.len() as f64;
        out.push_str(&format!(
            "Average usage: {avg:.1}% (across {} cores)",
            per_core.len()
        ));
    }
    Ok(out)
}

fn physical_core_count() -> Option<usize> {
    let raw = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    let mut package = None;
    let mut pairs = std::collections::HashSet::new();
    for line in raw.lines() {
        let mut parts = line.splitn(2, ':');
        let key = parts.next()?.trim();
        let value = parts.next().map(str::trim);
        match (key, value) {
            ("physical id", Some(v)) => package = Some(v.to_string()),
            ("core id", Some(v)) => {
                pairs.insert((package.clone().unwrap_or_default(), v.to_string()));
            }
            _ => {}
        }
    }
    if pairs.is_empty() { None } else { Some(pairs.len()) }
}

fn current_frequency_mhz() -> Option<f64> {
    let raw = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    let freqs: Vec<f64> = raw
        .lines()
        .filter(|line| line.starts_with("cpu MHz"))
        .filter_map(|line| line.split(':').nth(1)?.trim().parse().ok())
        .collect();
    if freqs.is_empty() {
        None
    } else {
        Some(freqs.iter().sum::<f64>() / freqs.len() as f64)
    }
}

fn max_frequency_mhz() -> Option<f64> {
    let raw =
        std::fs::read_to_string("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq").ok()?;
    raw.trim().parse::<f64>().ok().map(|khz| khz / 1000.0)
}

async fn get_memory_info(_args: ToolArgs, _ctx: Arc<ToolContext>) -> Result<String> {
    let Some(memory) = MemInfo::read() else {
        return Ok(UNAVAILABLE.to_string());
    };

    let swap_used = memory.swap_total.saturating_sub(memory.swap_free);
    let mut out = String::from("Memory Information:\n");
    out.push_str(&format!("RAM Total: {}GB\n", memory.total / GIB));
    out.push_str(&format!(
        "RAM Used: {}GB ({:.1}%)\n",
        memory.used() / GIB,
        memory.percent_used()
    ));
    out.push_str(&format!("RAM Available: {}GB\n", memory.available / GIB));
    out.push_str(&format!(
        "Swap Used: {}GB of {}GB",
        swap_used / GIB,
        memory.swap_total / GIB
    ));
    Ok(out)
}

/// `df` output for one mount, in bytes
struct DiskUsage {
    total: u64,
    used: u64,
    available: u64,
}

impl DiskUsage {
    fn percent_used(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f64 / self.total as f64 * 100.0
    }
}

async fn disk_usage(path: &str, ctx: &ToolContext) -> Option<DiskUsage> {
    let out = run_probe(
        "df",
        &["-B1", "--output=size,used,avail", path],
        ctx.subprocess_timeout,
    )
    .await?;
    let line = out.lines().nth(1)?;
    let values: Vec<u64> = line
        .split_whitespace()
        .filter_map(|v| v.parse().ok())
        .collect();
    if values.len() < 3 {
        return None;
    }
    Some(DiskUsage {
        total: values[0],
        used: values[1],
        available: values[2],
    })
}

async fn get_disk_usage(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let raw_path = args.str_or("path", "/").to_string();
    let target = if raw_path == "/" {
        std::path::PathBuf::from("/")
    } else {
        expand_path(&raw_path, &ctx.home)
    };

    if !target.exists() {
        return Ok(format!("Path not found: {raw_path}"));
    }

    match disk_usage(&target.to_string_lossy(), &ctx).await {
        Some(disk) => {
            let mut out = format!("Disk Usage for {raw_path}:\n");
            out.push_str(&format!("Total: {}GB\n", disk.total / GIB));
            out.push_str(&format!(
                "Used: {}GB ({:.1}%)\n",
                disk.used / GIB,
                disk.percent_used()
            ));
            out.push_str(&format!("Free: {}GB", disk.available / GIB));
            Ok(out)
        }
        None => Ok(format!(
            "Could not get disk usage for {raw_path}. The df utility is unavailable."
        )),
    }
}

/// One NVIDIA GPU as reported by nvidia-smi
struct NvidiaGpu {
    name: String,
    vram_used_mb: f64,
    vram_total_mb: f64,
    load_percent: f64,
    temperature_c: Option<f64>,
}

async fn nvidia_gpus(ctx: &ToolContext) -> Option<Vec<NvidiaGpu>> {
    let out = run_probe(
        "nvidia-smi",
        &[
            "--query-gpu=name,memory.used,memory.total,utilization.gpu,temperature.gpu",
            "--format=csv,noheader,nounits",
        ],
        ctx.subprocess_timeout,
    )
    .await?;

    let gpus: Vec<NvidiaGpu> = out
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 4 {
                return None;
            }
            Some(NvidiaGpu {
                name: fields[0].to_string(),
                vram_used_mb: fields[1].parse().ok()?,
                vram_total_mb: fields[2].parse().ok()?,
                load_percent: fields[3].parse().ok()?,
                temperature_c: fields.get(4).and_then(|t| t.parse().ok()),
            })
        })
        .collect();
    if gpus.is_empty() { None } else { Some(gpus) }
}

async fn amd_gpu_raw(ctx: &ToolContext) -> Option<String> {
    let out = run_probe(
        "rocm-smi",
        &["--showuse", "--showmeminfo", "vram", "--showtemp"],
        ctx.subprocess_timeout,
    )
    .await?;
    if out.contains("GPU") { Some(out) } else { None }
}

async fn get_gpu_info(_args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let mut sections = Vec::new();

    if let Some(gpus) = nvidia_gpus(&ctx).await {
        sections.push("NVIDIA GPU Information:".to_string());
        for (i, gpu) in gpus.iter().enumerate() {
            let vram_percent = if gpu.vram_total_mb > 0.0 {
                gpu.vram_used_mb / gpu.vram_total_mb * 100.0
            } else {
                0.0
            };
            sections.push(format!("GPU {i}: {}", gpu.name));
            sections.push(format!(
                "  VRAM: {:.0}MB / {:.0}MB ({vram_percent:.0}%)",
                gpu.vram_used_mb, gpu.vram_total_mb
            ));
            sections.push(format!("  GPU Load: {:.0}%", gpu.load_percent));
            if let Some(temp) = gpu.temperature_c {
                sections.push(format!("  Temperature: {temp:.0}°C"));
            }
        }
    }

    if let Some(raw) = amd_gpu_raw(&ctx).await {
        sections.push("AMD GPU Information:".to_string());
        for line in raw.lines() {
            let line = line.trim();
            if !line.is_empty() && !line.starts_with('=') {
                sections.push(format!("  {line}"));
            }
        }
    }

    if sections.is_empty() {
        // Last resort: at least say whether hardware exists
        if let Some(lspci) = run_probe("lspci", &[], ctx.subprocess_timeout).await {
            for line in lspci.lines() {
                if line.contains("VGA") || line.contains("3D") {
                    return Ok(format!(
                        "GPU detected but no driver tools available:\n{}\nInstall nvidia-smi \
                         (NVIDIA) or ROCm (AMD) for detailed info.",
                        line.trim()
                    ));
                }
            }
        }
        return Ok("No GPU detected or GPU tools not installed. Install nvidia-smi for NVIDIA \
                   or ROCm for AMD."
            .to_string());
    }

    Ok(sections.join("\n"))
}

async fn get_battery_status(_args: ToolArgs, _ctx: Arc<ToolContext>) -> Result<String> {
    let supply_root = Path::new("/sys/class/power_supply");
    if !supply_root.is_dir() {
        return Ok("Battery monitoring unavailable on this platform.".to_string());
    }

    let Ok(entries) = std::fs::read_dir(supply_root) else {
        return Ok("Battery monitoring unavailable on this platform.".to_string());
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let kind = std::fs::read_to_string(path.join("type")).unwrap_or_default();
        if kind.trim() != "Battery" {
            continue;
        }

        let capacity = read_sysfs_u64(&path.join("capacity"));
        let status = std::fs::read_to_string(path.join("status"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let Some(percent) = capacity else { continue };
        let plugged = matches!(status.as_str(), "Charging" | "Full" | "Not charging");
        let label = if plugged { "Charging" } else { "On Battery" };
        let time_left = battery_time_left(&path, plugged);
        return Ok(format!(
            "Battery: {percent}% - {label}. Time remaining: {time_left}"
        ));
    }

    Ok("No battery detected. This appears to be a desktop system.".to_string())
}

fn read_sysfs_u64(path: &Path) -> Option<u64> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

fn battery_time_left(supply: &Path, plugged: bool) -> String {
    if plugged {
        return "Unlimited (plugged in)".to_string();
    }
    // energy in µWh, power in µW; their ratio is hours
    let energy = read_sysfs_u64(&supply.join("energy_now"))
        .or_else(|| read_sysfs_u64(&supply.join("charge_now")));
    let power = read_sysfs_u64(&supply.join("power_now"))
        .or_else(|| read_sysfs_u64(&supply.join("current_now")));
    match (energy, power) {
        (Some(energy), Some(power)) if power > 0 => {
            let total_minutes = energy * 60 / power;
            format!("{}h {}m", total_minutes / 60, total_minutes % 60)
        }
        _ => "Unknown".to_string(),
    }
}

/// One process snapshot for ranking
struct ProcSample {
    name: String,
    cpu_jiffies: u64,
    rss_bytes: u64,
}

fn sample_processes() -> Option<HashMap<u32, ProcSample>> {
    let entries = std::fs::read_dir("/proc").ok()?;
    let mut samples = HashMap::new();
    for entry in entries.flatten() {
        let Ok(pid) = entry.file_name().to_string_lossy().parse::<u32>() else {
            continue;
        };
        let path = entry.path();
        // Processes may exit between readdir and read; skip quietly
        let Ok(stat) = std::fs::read_to_string(path.join("stat")) else {
            continue;
        };
        // comm is parenthesized and may contain spaces; split around it
        let close = stat.rfind(')').unwrap_or(0);
        let name = stat
            .find('(')
            .map(|open| stat[open + 1..close].to_string())
            .unwrap_or_default();
        let after: Vec<&str> = stat[close + 1..].split_whitespace().collect();
        // fields 14/15 of stat (utime, stime) land at offsets 11/12 here
        let utime: u64 = after.get(11).and_then(|v| v.parse().ok()).unwrap_or(0);
        let stime: u64 = after.get(12).and_then(|v| v.parse().ok()).unwrap_or(0);

        let rss_bytes = std::fs::read_to_string(path.join("status"))
            .ok()
            .and_then(|status| {
                status.lines().find_map(|line| {
                    line.strip_prefix("VmRSS:")?
                        .split_whitespace()
                        .next()?
                        .parse::<u64>()
                        .ok()
                })
            })
            .map_or(0, |kb| kb * 1024);

        samples.insert(
            pid,
            ProcSample {
                name,
                cpu_jiffies: utime + stime,
                rss_bytes,
            },
        );
    }
    Some(samples)
}

/// Out-of-enum sort keys fall back to CPU ordering; a model asking for
/// "disk" still gets an answer
fn normalize_sort_key(raw: &str) -> &'static str {
    match raw.to_lowercase().as_str() {
        "memory" => "memory",
        _ => "cpu",
    }
}

async fn list_processes(args: ToolArgs, _ctx: Arc<ToolContext>) -> Result<String> {
    let sort_by = normalize_sort_key(args.str_or("sort_by", "cpu"));
    let limit = args.int_or("limit", 5).clamp(1, 20) as usize;

    let Some(memory) = MemInfo::read() else {
        return Ok(UNAVAILABLE.to_string());
    };
    let Some((total_before, cores)) = read_cpu_times() else {
        return Ok(UNAVAILABLE.to_string());
    };
    let Some(before) = sample_processes() else {
        return Ok(UNAVAILABLE.to_string());
    };

    tokio::time::sleep(CPU_SAMPLE_INTERVAL).await;

    let Some((total_after, _)) = read_cpu_times() else {
        return Ok(UNAVAILABLE.to_string());
    };
    let Some(after) = sample_processes() else {
        return Ok(UNAVAILABLE.to_string());
    };

    let total_delta = total_after.total.saturating_sub(total_before.total);
    let ncpus = cores.len().max(1) as f64;

    let mut ranked: Vec<(String, f64, f64)> = after
        .iter()
        .map(|(pid, sample)| {
            let cpu = before.get(pid).map_or(0.0, |prev| {
                if total_delta == 0 {
                    0.0
                } else {
                    sample.cpu_jiffies.saturating_sub(prev.cpu_jiffies) as f64
                        / total_delta as f64
                        * ncpus
                        * 100.0
                }
            });
            let mem = if memory.total == 0 {
                0.0
            } else {
                sample.rss_bytes as f64 / memory.total as f64 * 100.0
            };
            (sample.name.clone(), cpu, mem)
        })
        .collect();

    if sort_by == "cpu" {
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    } else {
        ranked.sort_by(|a, b| b.2.total_cmp(&a.2));
    }

    let mut out = format!("Top {limit} processes by {}:\n", sort_by.to_uppercase());
    for (i, (name, cpu, mem)) in ranked.iter().take(limit).enumerate() {
        let mut name = name.clone();
        name.truncate(20);
        out.push_str(&format!(
            "{}. {name} - CPU: {cpu:.1}%, RAM: {mem:.1}%\n",
            i + 1
        ));
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_percent_between_samples() {
        let before = CpuTimes { busy: 100, total: 1000 };
        let after = CpuTimes { busy: 150, total: 1100 };
        let pct = percent_between(before, after);
        assert!((pct - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn cpu_percent_handles_no_progress() {
        let times = CpuTimes { busy: 100, total: 1000 };
        assert_eq!(percent_between(times, times), 0.0);
    }

    #[test]
    fn unknown_sort_keys_fall_back_to_cpu() {
        assert_eq!(normalize_sort_key("memory"), "memory");
        assert_eq!(normalize_sort_key("MEMORY"), "memory");
        assert_eq!(normalize_sort_key("cpu"), "cpu");
        assert_eq!(normalize_sort_key("disk"), "cpu");
        assert_eq!(normalize_sort_key(""), "cpu");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn reads_meminfo_on_linux() {
        let memory = MemInfo::read().unwrap();
        assert!(memory.total > 0);
        assert!(memory.used() <= memory.total);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn reads_cpu_times_on_linux() {
        let (aggregate, cores) = read_cpu_times().unwrap();
        assert!(aggregate.total > 0);
        assert!(!cores.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn samples_processes_on_linux() {
        let samples = sample_processes().unwrap();
        // At minimum, this test process exists
        assert!(!samples.is_empty());
    }
}
