use anyhow::{Context as _, Result, bail};
use tokio::io::{AsyncRead, AsyncReadExt as _};

const INITIAL_KEY: u8 = 171;

/// Replies larger than this are treated as garbage.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

pub fn encrypt(plaintext: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    plaintext
        .iter()
        .map(|&b| {
            key ^= b;
            key
        })
        .collect()
}

pub fn decrypt(ciphertext: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    ciphertext
        .iter()
        .map(|&b| {
            let plain = key ^ b;
            key = b;
            plain
        })
        .collect()
}

pub fn frame(plaintext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(plaintext.len() + 4);
    out.extend_from_slice(&(plaintext.len() as u32).to_be_bytes());
    out.extend_from_slice(&encrypt(plaintext));
    out
}

/// Reads one length-prefixed frame and returns the decrypted payload.
pub async fn read_frame<R>(reader: &mut R) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; 4];
    reader
        .read_exact(&mut header)
        .await
        .context("failed to read frame length")?;

    let len = u32::from_be_bytes(header) as usize;
    if len > MAX_FRAME_LEN {
        bail!("frame of {len} bytes exceeds the {MAX_FRAME_LEN} byte limit");
    }

    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .await
        .context("failed to read frame payload")?;

    Ok(decrypt(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GET_SYSINFO: &[u8] = br#"{"system":{"get_sysinfo":{}}}"#;

    #[test]
    fn encrypt_chains_the_key() {
        let ciphertext = encrypt(GET_SYSINFO);
        assert_eq!(&ciphertext[..4], &[0xd0, 0xf2, 0x81, 0xf8]);
        assert_eq!(decrypt(&ciphertext), GET_SYSINFO);
    }

    #[test]
    fn frame_prefixes_plaintext_length() {
        let framed = frame(GET_SYSINFO);
        assert_eq!(&framed[..4], &(GET_SYSINFO.len() as u32).to_be_bytes());
        assert_eq!(framed.len(), GET_SYSINFO.len() + 4);
    }

    #[tokio::test]
    async fn read_frame_decrypts_payload() {
        let framed = frame(br#"{"ok":1}"#);
        let mut reader = &framed[..];
        assert_eq!(read_frame(&mut reader).await.unwrap(), br#"{"ok":1}"#);
    }

    #[tokio::test]
    async fn read_frame_rejects_oversized_length() {
        let mut framed = vec![0x7f, 0xff, 0xff, 0xff];
        framed.extend_from_slice(b"junk");
        let mut reader = &framed[..];
        assert!(read_frame(&mut reader).await.is_err());
    }

    #[tokio::test]
    async fn read_frame_rejects_truncated_payload() {
        let mut framed = frame(GET_SYSINFO);
        framed.truncate(10);
        let mut reader = &framed[..];
        assert!(read_frame(&mut reader).await.is_err());
    }
}
