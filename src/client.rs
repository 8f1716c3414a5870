// src/client.rs

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use num::BigInt;
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use crate::config::client_config::MAX_REQUEST_SIZE;
use crate::config::ClientConfig;
use crate::core::integer_buffer::IntegerBuffer;
use crate::core::rescale::{narrow, TargetRange, SOURCE_MAX, SOURCE_MIN};
use crate::error::{RandomOrgError, Result};
use crate::transport::{HttpTransport, Transport};

pub const INTEGERS_PATH: &str = "/integers/";
pub const QUOTA_PATH: &str = "/quota/";

/// Remaining bit allowance reported by random.org at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaStatus {
    /// Address the quota was queried for, `None` for the caller's own address
    pub ip: Option<String>,
    /// May be negative once the allowance is overdrawn
    pub bits_remaining: i64,
    pub checked_at: DateTime<Utc>,
}

impl QuotaStatus {
    pub fn is_available(&self) -> bool {
        self.bits_remaining > 0
    }
}

/// Client for the random.org plain-text HTTP interface.
///
/// Raw integers are always requested over the widest domain the service
/// offers, `[-1e9, 1e9]`, and buffered. Each call takes what it needs from
/// the buffer and rescales it into the caller's bounds, so leftovers from one
/// call serve the next without another round trip.
pub struct RandomOrgClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
    buffer: IntegerBuffer,
}

impl RandomOrgClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        info!("random.org client using {}", transport.base_url());
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> RandomOrgClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let buffer = IntegerBuffer::new(&config.buffer);
        RandomOrgClient {
            config,
            transport,
            buffer,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of raw integers held for later calls.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Fetches `count` raw integers in `[SOURCE_MIN, SOURCE_MAX]`, bypassing the buffer.
    pub fn fetch_raw(&self, count: usize) -> Result<Vec<i64>> {
        fetch_raw(&self.transport, count)
    }

    pub fn big_integers(&mut self, count: usize, min: &BigInt, max: &BigInt) -> Result<Vec<BigInt>> {
        let range = TargetRange::new(min, max)?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let transport = &self.transport;
        let check_quota = self.config.check_quota;
        let raw = self.buffer.take(count, |n| {
            if check_quota {
                let bits = quota(transport, None)?;
                if bits <= 0 {
                    warn!("Skipping refill of {} integers, quota is {}", n, bits);
                    return Err(RandomOrgError::QuotaExhausted(bits));
                }
            }
            fetch_raw(transport, n)
        })?;

        raw.into_iter().map(|value| range.apply(value)).collect()
    }

    pub fn integers(&mut self, count: usize, min: i64, max: i64) -> Result<Vec<i64>> {
        self.big_integers(count, &BigInt::from(min), &BigInt::from(max))?
            .iter()
            .map(narrow::<i64>)
            .collect()
    }

    pub fn integer(&mut self, min: i64, max: i64) -> Result<i64> {
        let mut values = self.integers(1, min, max)?;
        values.pop().ok_or_else(|| {
            warn!("Expected one integer in [{}, {}], got none", min, max);
            RandomOrgError::ShortResponse { expected: 1, received: 0 }
        })
    }

    pub fn bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.big_integers(count, &BigInt::from(u8::MIN), &BigInt::from(u8::MAX))?
            .iter()
            .map(narrow::<u8>)
            .collect()
    }

    /// Remaining bit allowance for the caller's own address.
    pub fn quota(&self) -> Result<i64> {
        quota(&self.transport, None)
    }

    pub fn quota_for_ip(&self, ip: IpAddr) -> Result<i64> {
        quota(&self.transport, Some(ip))
    }

    pub fn has_quota(&self) -> Result<bool> {
        Ok(self.quota()? > 0)
    }

    pub fn quota_status(&self, ip: Option<IpAddr>) -> Result<QuotaStatus> {
        let bits_remaining = quota(&self.transport, ip)?;
        Ok(QuotaStatus {
            ip: ip.map(|addr| addr.to_string()),
            bits_remaining,
            checked_at: Utc::now(),
        })
    }
}

impl<T: Transport> TryRngCore for RandomOrgClient<T> {
    type Error = RandomOrgError;

    fn try_next_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.try_fill_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn try_next_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.try_fill_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        let bytes = self.bytes(dst.len())?;
        dst.copy_from_slice(&bytes);
        Ok(())
    }
}

fn fetch_raw<T: Transport>(transport: &T, count: usize) -> Result<Vec<i64>> {
    let mut values = Vec::with_capacity(count);
    while values.len() < count {
        let chunk = (count - values.len()).min(MAX_REQUEST_SIZE);
        let query = [
            ("num", chunk.to_string()),
            ("min", SOURCE_MIN.to_string()),
            ("max", SOURCE_MAX.to_string()),
            ("col", "1".to_string()),
            ("base", "10".to_string()),
            ("format", "plain".to_string()),
            ("rnd", "new".to_string()),
        ];
        debug!("Requesting {} raw integers", chunk);
        let body = transport.get(INTEGERS_PATH, &query)?;
        let parsed = parse_integers(&body)?;

        if parsed.len() != chunk {
            warn!("Requested {} integers, server returned {}", chunk, parsed.len());
            return Err(RandomOrgError::ShortResponse {
                expected: chunk,
                received: parsed.len(),
            });
        }
        values.extend(parsed);
    }
    Ok(values)
}

fn quota<T: Transport>(transport: &T, ip: Option<IpAddr>) -> Result<i64> {
    let mut query = Vec::with_capacity(2);
    if let Some(addr) = ip {
        query.push(("ip", addr.to_string()));
    }
    query.push(("format", "plain".to_string()));

    let body = transport.get(QUOTA_PATH, &query)?;
    let bits = parse_line(body.trim())?;
    debug!("Quota for {}: {} bits", ip.map_or_else(|| "this host".to_string(), |a| a.to_string()), bits);
    Ok(bits)
}

/// Parses a newline-delimited list of integers, checking each against the source domain.
pub fn parse_integers(body: &str) -> Result<Vec<i64>> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let value = parse_line(line)?;
            if !(SOURCE_MIN..=SOURCE_MAX).contains(&value) {
                warn!("Server value {} outside requested range", value);
                return Err(RandomOrgError::OutOfSourceRange(value));
            }
            Ok(value)
        })
        .collect()
}

fn parse_line(line: &str) -> Result<i64> {
    line.parse::<i64>().map_err(|_| {
        warn!("Unparseable response line {:?}", line);
        RandomOrgError::Parse { line: line.to_string() }
    })
}
