//! Synthetic InterOp files for integration tests.
#![allow(dead_code)]

use std::{fs, path::Path};

pub fn header(version: u8, record_size: u8) -> Vec<u8> {
    vec![version, record_size]
}

/// Adapter block; every adapter must have the same length.
pub fn adapter_block(adapters: &[&[u8]]) -> Vec<u8> {
    let len = adapters.first().map_or(0, |a| a.len()) as u16;
    let mut b = Vec::new();
    b.extend_from_slice(&(adapters.len() as u16).to_le_bytes());
    b.extend_from_slice(&len.to_le_bytes());
    for a in adapters {
        assert_eq!(a.len(), len as usize, "adapters must share one length");
        b.extend_from_slice(a);
    }
    b
}

pub fn v3_record(lane: u16, tile: u16, cycle: u16, rate: f32, reads: [u32; 5]) -> Vec<u8> {
    let mut b = Vec::with_capacity(30);
    b.extend_from_slice(&lane.to_le_bytes());
    b.extend_from_slice(&tile.to_le_bytes());
    b.extend_from_slice(&cycle.to_le_bytes());
    b.extend_from_slice(&rate.to_le_bytes());
    for n in reads {
        b.extend_from_slice(&n.to_le_bytes());
    }
    b
}

pub fn v4_record(lane: u16, tile: u32, cycle: u16, rate: f32) -> Vec<u8> {
    let mut b = Vec::with_capacity(12);
    b.extend_from_slice(&lane.to_le_bytes());
    b.extend_from_slice(&tile.to_le_bytes());
    b.extend_from_slice(&cycle.to_le_bytes());
    b.extend_from_slice(&rate.to_le_bytes());
    b
}

pub fn v6_record(lane: u16, tile: u32, cycle: u16, rate: f32, adapter_rates: &[f32]) -> Vec<u8> {
    let mut b = v4_record(lane, tile, cycle, rate);
    for r in adapter_rates {
        b.extend_from_slice(&r.to_le_bytes());
    }
    b
}

pub fn tile_record(lane: u16, tile: u16, code: u16, value: f32) -> Vec<u8> {
    let mut b = Vec::with_capacity(10);
    b.extend_from_slice(&lane.to_le_bytes());
    b.extend_from_slice(&tile.to_le_bytes());
    b.extend_from_slice(&code.to_le_bytes());
    b.extend_from_slice(&value.to_le_bytes());
    b
}

pub fn write_metrics(dir: &Path, file_name: &str, bytes: &[u8]) {
    fs::write(dir.join(file_name), bytes).unwrap();
}
