//! # LSB 隐写核心模块
//!
//! 载荷格式：32 位大端序长度前缀，紧跟消息的原始字节，所有比特均为高位在前。
//! 每个通道的最低有效位承载 1 bit，比特序号连续递增，长度前缀与消息之间不做任何对齐。

use crate::channel::capacity_bits;
use crate::constants::{LENGTH_PREFIX_BITS, MAX_PAYLOAD_LEN, NO_MESSAGE_SENTINEL};
use crate::error::CapacityError;
use crate::pixel::PixelGrid;
use log::debug;

/// 将 `value` 的低 `bits` 位按高位在前写入从 `start` 开始的连续比特。
///
/// 只改写每个目标通道的最低位，其余 7 位保持不变。
///
/// # Errors
///
/// 写入区域超出图像容量时返回 `CapacityError`，此时图像不会被修改。
pub fn modify(
    grid: &mut PixelGrid,
    start: usize,
    bits: usize,
    value: u32,
) -> Result<(), CapacityError> {
    debug_assert!(bits <= 32, "Attempted to hide more than 32 bits.");
    check_region(grid, start, bits)?;
    let available_bits = capacity_bits(grid);

    for i in 0..bits {
        let bit = ((value >> (bits - 1 - i)) & 1) as u8;
        let channel = grid
            .channel_mut(start + i)
            .ok_or_else(|| out_of_range(start + i, available_bits))?;
        *channel = (*channel & 0xFE) | bit;
    }

    Ok(())
}

/// 从 `start` 开始读取 `bits` 个比特 (最多 32 个)，按高位在前拼成一个整数。
///
/// # Errors
///
/// 读取区域超出图像容量时返回 `CapacityError`。
pub fn recover(grid: &PixelGrid, start: usize, bits: usize) -> Result<u32, CapacityError> {
    debug_assert!(bits <= 32, "Attempted to recover more than 32 bits.");
    check_region(grid, start, bits)?;

    (start..start + bits).try_fold(0u32, |acc, bit_index| {
        let channel = grid
            .channel(bit_index)
            .ok_or_else(|| out_of_range(bit_index, capacity_bits(grid)))?;
        Ok((acc << 1) | u32::from(channel & 1))
    })
}

fn out_of_range(bit_index: usize, available_bits: usize) -> CapacityError {
    CapacityError {
        required_bits: bit_index + 1,
        available_bits,
    }
}

fn check_region(grid: &PixelGrid, start: usize, bits: usize) -> Result<(), CapacityError> {
    let available_bits = capacity_bits(grid);
    match start.checked_add(bits) {
        Some(end) if end <= available_bits => Ok(()),
        end => Err(CapacityError {
            required_bits: end.unwrap_or(usize::MAX),
            available_bits,
        }),
    }
}

/// 隐藏 `payload_len` 字节的消息所需的比特数 (含长度前缀)。
pub fn required_bits(payload_len: usize) -> usize {
    payload_len.saturating_mul(8).saturating_add(LENGTH_PREFIX_BITS)
}

/// 图像最多能隐藏的消息字节数。
pub fn max_payload_len(grid: &PixelGrid) -> usize {
    capacity_bits(grid).saturating_sub(LENGTH_PREFIX_BITS) / 8
}

/// 将消息嵌入图像。
///
/// # Errors
///
/// 长度前缀加消息超出容量时返回 `CapacityError`，图像保持原样，不会发生部分写入。
pub fn embed(grid: &mut PixelGrid, payload: &[u8]) -> Result<(), CapacityError> {
    let too_long = CapacityError {
        required_bits: required_bits(payload.len()),
        available_bits: capacity_bits(grid),
    };
    if too_long.required_bits > too_long.available_bits {
        return Err(too_long);
    }
    let len = u32::try_from(payload.len()).map_err(|_| too_long)?;

    modify(grid, 0, LENGTH_PREFIX_BITS, len)?;

    payload.iter().enumerate().try_for_each(|(i, &byte)| {
        modify(grid, LENGTH_PREFIX_BITS + 8 * i, 8, byte.into())
    })
}

/// 尝试提取隐藏的消息。
///
/// 长度前缀不在 `1..=MAX_PAYLOAD_LEN` 内，或声明的长度超出图像容量时返回 `None`。
/// 这只是一个合理性过滤：载荷本身的比特损坏无法被发现。
pub fn try_extract(grid: &PixelGrid) -> Option<Vec<u8>> {
    let len = recover(grid, 0, LENGTH_PREFIX_BITS).ok()?;
    debug!("Extracted message length: {len}");

    if len == 0 || len > MAX_PAYLOAD_LEN {
        debug!("Invalid message length, no payload present");
        return None;
    }

    (0..len as usize)
        .map(|i| {
            recover(grid, LENGTH_PREFIX_BITS + 8 * i, 8)
                .ok()
                .map(|byte| byte as u8)
        })
        .collect()
}

/// 提取隐藏的消息；没有可信载荷时返回固定的 `"No hidden message found"`。
pub fn extract(grid: &PixelGrid) -> Vec<u8> {
    try_extract(grid).unwrap_or_else(|| NO_MESSAGE_SENTINEL.as_bytes().to_vec())
}
