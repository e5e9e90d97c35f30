use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Resource usage captured at the end of one engine phase.
///
/// `memory_mb` and `cpu_usage` stay `None` when process stats are unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStats {
    pub phase: &'static str,
    pub elapsed: Duration,
    pub memory_mb: Option<u64>,
    pub cpu_usage: Option<f32>,
}

/// Records one [`PhaseStats`] per engine phase when enabled.
pub struct SystemMonitor {
    enabled: bool,
    start_time: Instant,
    phases: Mutex<Vec<PhaseStats>>,
    #[cfg(feature = "cli")]
    sampler: Option<ProcessSampler>,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            start_time: Instant::now(),
            phases: Mutex::new(Vec::new()),
            #[cfg(feature = "cli")]
            sampler: enabled.then(ProcessSampler::new).flatten(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Captures usage for `phase`, logs it and keeps it for [`finish`](Self::finish).
    pub fn record(&self, phase: &'static str) {
        if !self.enabled {
            return;
        }

        let (memory_mb, cpu_usage) = self.sample();
        let stats = PhaseStats {
            phase,
            elapsed: self.start_time.elapsed(),
            memory_mb,
            cpu_usage,
        };

        match (stats.memory_mb, stats.cpu_usage) {
            (Some(memory), Some(cpu)) => tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Time: {:?}",
                phase,
                cpu,
                memory,
                stats.elapsed
            ),
            _ => tracing::info!("📊 {} - Time: {:?}", phase, stats.elapsed),
        }

        if let Ok(mut phases) = self.phases.lock() {
            phases.push(stats);
        }
    }

    /// Logs the peak memory seen so far and hands back every recorded phase.
    pub fn finish(&self) -> Vec<PhaseStats> {
        let phases = match self.phases.lock() {
            Ok(mut phases) => std::mem::take(&mut *phases),
            Err(_) => Vec::new(),
        };

        if self.enabled {
            let peak = phases.iter().filter_map(|p| p.memory_mb).max();
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}",
                self.start_time.elapsed(),
                peak.map_or_else(|| "n/a".to_string(), |mb| format!("{}MB", mb))
            );
        }
        phases
    }

    #[cfg(feature = "cli")]
    fn sample(&self) -> (Option<u64>, Option<f32>) {
        self.sampler
            .as_ref()
            .and_then(ProcessSampler::sample)
            .map_or((None, None), |(memory, cpu)| (Some(memory), Some(cpu)))
    }

    #[cfg(not(feature = "cli"))]
    fn sample(&self) -> (Option<u64>, Option<f32>) {
        (None, None)
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(feature = "cli")]
struct ProcessSampler {
    system: Mutex<sysinfo::System>,
    pid: sysinfo::Pid,
}

#[cfg(feature = "cli")]
impl ProcessSampler {
    fn new() -> Option<Self> {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::warn!("System monitor cannot resolve current PID: {}", e);
                return None;
            }
        };
        let mut system =
            sysinfo::System::new_with_specifics(sysinfo::RefreshKind::everything());
        system.refresh_all();
        Some(Self {
            system: Mutex::new(system),
            pid,
        })
    }

    /// Memory in MB and CPU percent of the current process.
    fn sample(&self) -> Option<(u64, f32)> {
        let mut system = self.system.lock().ok()?;
        system.refresh_all();
        let process = system.process(self.pid)?;
        Some((process.memory() / 1024 / 1024, process.cpu_usage()))
    }
}
