//! PCM 音频容器封装
//!
//! 将原始 PCM 采样数据封装为带 44 字节头的未压缩 WAV 容器，
//! 使标准播放器无需了解合成服务的裸输出格式即可直接播放。

/// WAV 头固定大小（字节）
pub const WAV_HEADER_SIZE: usize = 44;

/// PCM 采样格式
///
/// 默认值对应外部合成服务的裸输出：24kHz、单声道、16-bit、小端。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    /// 采样率（Hz）
    pub sample_rate: u32,
    /// 声道数
    pub channels: u16,
    /// 位深
    pub bits_per_sample: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            sample_rate: 24_000,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

/// 将原始 PCM 字节封装为 WAV 容器
///
/// 输出为 44 字节头 + 原样拷贝的 PCM 载荷，输入不被修改。
/// 采样率、声道数、位深按给定值写入头部，不做合理性校验，
/// 调用方负责保证参数与实际 PCM 来源一致。
pub fn pcm_to_wav(pcm: &[u8], format: PcmFormat) -> Vec<u8> {
    let byte_rate =
        format.sample_rate * format.channels as u32 * (format.bits_per_sample / 8) as u32;
    let block_align = format.channels * (format.bits_per_sample / 8);
    let data_size = pcm.len();
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(WAV_HEADER_SIZE + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(file_size as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());
    wav.extend_from_slice(pcm);

    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32_le(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
    }

    fn read_u16_le(buf: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([buf[offset], buf[offset + 1]])
    }

    #[test]
    fn test_header_sizes_for_1000_byte_payload() {
        let pcm = vec![0u8; 1000];
        let wav = pcm_to_wav(&pcm, PcmFormat::default());

        assert_eq!(wav.len(), 1044);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(read_u32_le(&wav, 4), 1036); // 36 + dataSize
        assert_eq!(read_u32_le(&wav, 40), 1000); // dataSize
    }

    #[test]
    fn test_header_tags_and_format_fields() {
        let wav = pcm_to_wav(&[1, 2, 3, 4], PcmFormat::default());

        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(read_u32_le(&wav, 16), 16); // fmt chunk size
        assert_eq!(read_u16_le(&wav, 20), 1); // uncompressed PCM
        assert_eq!(read_u16_le(&wav, 22), 1); // channels
        assert_eq!(read_u32_le(&wav, 24), 24_000); // sample rate
        assert_eq!(read_u32_le(&wav, 28), 48_000); // byte rate = 24000 * 1 * 2
        assert_eq!(read_u16_le(&wav, 32), 2); // block align
        assert_eq!(read_u16_le(&wav, 34), 16); // bits per sample
    }

    #[test]
    fn test_computed_fields_for_stereo() {
        let format = PcmFormat {
            sample_rate: 44_100,
            channels: 2,
            bits_per_sample: 16,
        };
        let wav = pcm_to_wav(&[0u8; 8], format);

        assert_eq!(read_u16_le(&wav, 22), 2);
        assert_eq!(read_u32_le(&wav, 24), 44_100);
        assert_eq!(read_u32_le(&wav, 28), 176_400); // 44100 * 2 * 2
        assert_eq!(read_u16_le(&wav, 32), 4);
    }

    #[test]
    fn test_payload_copied_unmodified() {
        let pcm: Vec<u8> = (0..=255).collect();
        let wav = pcm_to_wav(&pcm, PcmFormat::default());

        assert_eq!(&wav[WAV_HEADER_SIZE..], pcm.as_slice());
    }

    #[test]
    fn test_declared_size_recovers_payload_length() {
        for len in [0usize, 1, 2, 443, 4800] {
            let pcm = vec![0xABu8; len];
            let wav = pcm_to_wav(&pcm, PcmFormat::default());

            assert_eq!(read_u32_le(&wav, 40) as usize, len);
            assert_eq!(read_u32_le(&wav, 4) as usize, 36 + len);
            assert_eq!(wav.len(), WAV_HEADER_SIZE + len);
        }
    }

    #[test]
    fn test_empty_payload_is_header_only() {
        let wav = pcm_to_wav(&[], PcmFormat::default());

        assert_eq!(wav.len(), WAV_HEADER_SIZE);
        assert_eq!(read_u32_le(&wav, 4), 36);
        assert_eq!(read_u32_le(&wav, 40), 0);
    }
}
