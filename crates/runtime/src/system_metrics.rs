//! Host and process gauges sampled with `sysinfo` at each metrics collection.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use opentelemetry::metrics::{Meter, ObservableCounter, ObservableGauge};
use opentelemetry::KeyValue;
use sysinfo::{Networks, Pid, ProcessesToUpdate, System};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemSnapshot {
    pub memory_used: u64,
    pub memory_free: u64,
    /// Reclaimable page cache, derived as available minus free.
    pub memory_cached: u64,
    /// Fraction in `0.0..=1.0`.
    pub cpu_utilization: f64,
    pub process_memory: u64,
    /// Fraction of one core.
    pub process_cpu_utilization: f64,
    /// Seconds of CPU consumed by this process since start.
    pub process_cpu_time: f64,
    /// Bytes across all interfaces since boot.
    pub network_received: u64,
    pub network_transmitted: u64,
}

pub struct SystemSampler {
    system: System,
    networks: Networks,
    pid: Pid,
}

impl SystemSampler {
    pub fn new() -> Result<Self> {
        let pid = sysinfo::get_current_pid().map_err(|error| anyhow!("failed to get current pid: {error}"))?;
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_cpu_usage();
        Ok(Self {
            system,
            networks: Networks::new_with_refreshed_list(),
            pid,
        })
    }

    pub fn sample(&mut self) -> SystemSnapshot {
        self.system.refresh_memory();
        self.system.refresh_cpu_usage();
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        self.networks.refresh(true);

        let (process_memory, process_cpu, process_cpu_ms) = self
            .system
            .process(self.pid)
            .map(|process| {
                (
                    process.memory(),
                    process.cpu_usage(),
                    process.accumulated_cpu_time(),
                )
            })
            .unwrap_or_default();

        let (network_received, network_transmitted) = self
            .networks
            .iter()
            .fold((0u64, 0u64), |(rx, tx), (_, data)| {
                (
                    rx.saturating_add(data.total_received()),
                    tx.saturating_add(data.total_transmitted()),
                )
            });

        let memory_free = self.system.free_memory();
        SystemSnapshot {
            memory_used: self.system.used_memory(),
            memory_free,
            memory_cached: self.system.available_memory().saturating_sub(memory_free),
            cpu_utilization: f64::from(self.system.global_cpu_usage()) / 100.0,
            process_memory,
            process_cpu_utilization: f64::from(process_cpu) / 100.0,
            process_cpu_time: process_cpu_ms as f64 / 1000.0,
            network_received,
            network_transmitted,
        }
    }
}

/// Registered gauges; callbacks run for as long as this is alive.
pub struct SystemMetrics {
    _memory_usage: ObservableGauge<u64>,
    _cpu_utilization: ObservableGauge<f64>,
    _process_memory_usage: ObservableGauge<u64>,
    _process_cpu_utilization: ObservableGauge<f64>,
    _process_cpu_time: ObservableCounter<f64>,
    _network_io: ObservableCounter<u64>,
}

impl SystemMetrics {
    pub fn register(meter: &Meter) -> Result<Self> {
        let sampler = Arc::new(Mutex::new(SystemSampler::new()?));

        let memory = Arc::clone(&sampler);
        let memory_usage = meter
            .u64_observable_gauge("system.memory.usage")
            .with_description("Host memory by state")
            .with_unit("By")
            .with_callback(move |observer| {
                if let Ok(mut sampler) = memory.lock() {
                    let snapshot = sampler.sample();
                    observer.observe(snapshot.memory_used, &[KeyValue::new("state", "used")]);
                    observer.observe(snapshot.memory_free, &[KeyValue::new("state", "free")]);
                    observer.observe(snapshot.memory_cached, &[KeyValue::new("state", "cached")]);
                }
            })
            .build();

        let cpu = Arc::clone(&sampler);
        let cpu_utilization = meter
            .f64_observable_gauge("system.cpu.utilization")
            .with_description("Host CPU utilization")
            .with_unit("1")
            .with_callback(move |observer| {
                if let Ok(mut sampler) = cpu.lock() {
                    observer.observe(sampler.sample().cpu_utilization, &[]);
                }
            })
            .build();

        let process_memory = Arc::clone(&sampler);
        let process_memory_usage = meter
            .u64_observable_gauge("process.memory.usage")
            .with_description("Resident memory of this process")
            .with_unit("By")
            .with_callback(move |observer| {
                if let Ok(mut sampler) = process_memory.lock() {
                    observer.observe(sampler.sample().process_memory, &[]);
                }
            })
            .build();

        let process_cpu = Arc::clone(&sampler);
        let process_cpu_utilization = meter
            .f64_observable_gauge("process.cpu.utilization")
            .with_description("CPU utilization of this process")
            .with_unit("1")
            .with_callback(move |observer| {
                if let Ok(mut sampler) = process_cpu.lock() {
                    observer.observe(sampler.sample().process_cpu_utilization, &[]);
                }
            })
            .build();

        let cpu_time = Arc::clone(&sampler);
        let process_cpu_time = meter
            .f64_observable_counter("process.cpu.time")
            .with_description("CPU time consumed by this process")
            .with_unit("s")
            .with_callback(move |observer| {
                if let Ok(mut sampler) = cpu_time.lock() {
                    observer.observe(sampler.sample().process_cpu_time, &[]);
                }
            })
            .build();

        let network = sampler;
        let network_io = meter
            .u64_observable_counter("system.network.io")
            .with_description("Bytes received and transmitted across all interfaces")
            .with_unit("By")
            .with_callback(move |observer| {
                if let Ok(mut sampler) = network.lock() {
                    let snapshot = sampler.sample();
                    observer.observe(
                        snapshot.network_received,
                        &[KeyValue::new("direction", "receive")],
                    );
                    observer.observe(
                        snapshot.network_transmitted,
                        &[KeyValue::new("direction", "transmit")],
                    );
                }
            })
            .build();

        Ok(Self {
            _memory_usage: memory_usage,
            _cpu_utilization: cpu_utilization,
            _process_memory_usage: process_memory_usage,
            _process_cpu_utilization: process_cpu_utilization,
            _process_cpu_time: process_cpu_time,
            _network_io: network_io,
        })
    }
}
