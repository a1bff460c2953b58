/// BMP 文件头 (BITMAPFILEHEADER) 的大小 (字节)。
pub const FILE_HEADER_SIZE: usize = 14;

/// BMP 信息头 (BITMAPINFOHEADER) 的大小 (字节)。
pub const INFO_HEADER_SIZE: usize = 40;

/// 两个头部的总大小，也是写出文件时像素数据的起始偏移。
pub const BMP_HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// BMP 文件的魔数签名。
pub const BMP_SIGNATURE: [u8; 2] = *b"BM";

// 头部字段在文件中的固定偏移 (小端序)。
pub const OFFSET_FILE_SIZE: usize = 2;
pub const OFFSET_RESERVED: usize = 6;
pub const OFFSET_DATA_OFFSET: usize = 10;
pub const OFFSET_HEADER_SIZE: usize = 14;
pub const OFFSET_WIDTH: usize = 18;
pub const OFFSET_HEIGHT: usize = 22;
pub const OFFSET_PLANES: usize = 26;
pub const OFFSET_BITS_PER_PIXEL: usize = 28;
pub const OFFSET_COMPRESSION: usize = 30;
pub const OFFSET_IMAGE_SIZE: usize = 34;
pub const OFFSET_X_PIXELS_PER_METER: usize = 38;
pub const OFFSET_Y_PIXELS_PER_METER: usize = 42;
pub const OFFSET_COLORS_USED: usize = 46;
pub const OFFSET_COLORS_IMPORTANT: usize = 50;

/// 每像素的通道数 (R, G, B, A)，每个通道承载 1 bit。
pub const CHANNELS_PER_PIXEL: usize = 4;

/// 长度前缀占用的 bit 数 (大端序 `u32`)。
pub const LENGTH_PREFIX_BITS: usize = 32;

/// 可被视为真实载荷的最大长度 (字节)。
/// 解码出的长度落在 `1..=MAX_PAYLOAD_LEN` 之外时，视为图像中没有隐藏信息。
pub const MAX_PAYLOAD_LEN: u32 = 10_000;

/// 未检测到隐藏信息时返回的固定文本。
pub const NO_MESSAGE_SENTINEL: &str = "No hidden message found";

/// `hide` 命令默认的输出文件名。
pub const DEFAULT_OUTPUT: &str = "output.bmp";

/// `fixture` 命令默认的输出文件名。
pub const DEFAULT_FIXTURE: &str = "test.bmp";

/// 测试图像的默认边长 (像素)。
pub const FIXTURE_SIZE: u32 = 100;
