//! # 通道映射模块
//!
//! 定义比特序号与 (像素, 通道) 之间唯一的遍历顺序。嵌入与提取都只通过这里定位比特，
//! 两者因此始终保持同步。

use crate::constants::CHANNELS_PER_PIXEL;
use crate::pixel::PixelGrid;

/// 像素内的通道，取值即为其在 `Pixel` 数组中的下标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
    Alpha = 3,
}

impl Channel {
    /// 按遍历顺序排列的全部通道。
    pub const ALL: [Channel; CHANNELS_PER_PIXEL] =
        [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// 一个比特在图像中的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitSlot {
    pub pixel: usize,
    pub channel: Channel,
}

/// 将比特序号映射到像素与通道：`pixel = bit / 4`，`channel = bit % 4`。
pub const fn locate(bit_index: usize) -> BitSlot {
    BitSlot {
        pixel: bit_index / CHANNELS_PER_PIXEL,
        channel: Channel::ALL[bit_index % CHANNELS_PER_PIXEL],
    }
}

/// 图像可承载的比特总数，即 `width * height * 4`。
pub fn capacity_bits(grid: &PixelGrid) -> usize {
    grid.pixels().len() * CHANNELS_PER_PIXEL
}

impl PixelGrid {
    /// 返回指定比特所在通道的值；超出容量时为 `None`。
    pub fn channel(&self, bit_index: usize) -> Option<u8> {
        let slot = locate(bit_index);
        self.pixels()
            .get(slot.pixel)
            .map(|pixel| pixel.0[slot.channel.index()])
    }

    /// 返回指定比特所在通道的可变引用；超出容量时为 `None`。
    pub fn channel_mut(&mut self, bit_index: usize) -> Option<&mut u8> {
        let slot = locate(bit_index);
        self.pixels_mut()
            .get_mut(slot.pixel)
            .map(|pixel| &mut pixel.0[slot.channel.index()])
    }
}
