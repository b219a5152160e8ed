//! # ESC/POS Barcode Commands
//!
//! Two families of commands are covered:
//!
//! | Kind | Prefix | Module |
//! |------|--------|--------|
//! | 1D barcodes | GS h / GS w / GS H / GS k | [`barcode1d`] |
//! | QR codes | GS ( k | [`qr`] |
//!
//! 1D barcodes are printed immediately by `GS k`. QR codes follow a
//! store-then-print model: the data goes into the symbol buffer with
//! function 80 and is printed with function 81.

// ============================================================================
// 1D BARCODES
// ============================================================================

pub mod barcode1d {
    use super::super::commands::GS;
    use crate::barcode::HriPosition;

    /// Power-on bar height in dots.
    pub const DEFAULT_HEIGHT: u8 = 162;

    /// Power-on module width.
    pub const DEFAULT_MODULE: u8 = 3;

    /// # Set Bar Height (GS h n)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | ASCII   | GS h n |
    /// | Hex     | 1D 68 n |
    ///
    /// `n` is the height in dots, 1-255.
    #[inline]
    pub fn set_height(n: u8) -> Vec<u8> {
        vec![GS, b'h', n]
    }

    /// # Set Module Width (GS w n)
    ///
    /// `n` is 2-6 on most printers.
    #[inline]
    pub fn set_module_width(n: u8) -> Vec<u8> {
        vec![GS, b'w', n]
    }

    /// # Select HRI Position (GS H n)
    ///
    /// | n | Position |
    /// |---|----------|
    /// | '0' | Not printed |
    /// | '1' | Above |
    /// | '2' | Below |
    /// | '3' | Above and below |
    #[inline]
    pub fn set_hri(position: HriPosition) -> Vec<u8> {
        let n = match position {
            HriPosition::None => b'0',
            HriPosition::Above => b'1',
            HriPosition::Below => b'2',
            HriPosition::Both => b'3',
        };
        vec![GS, b'H', n]
    }

    /// Decode the `GS H` parameter (binary or ASCII digit).
    pub fn hri_from_param(n: u8) -> HriPosition {
        match n {
            1 | b'1' => HriPosition::Above,
            2 | b'2' => HriPosition::Below,
            3 | b'3' => HriPosition::Both,
            _ => HriPosition::None,
        }
    }

    /// # Print Barcode (GS k m n d1...dn)
    ///
    /// Uses the length-prefixed form (`m` = 65-79).
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | ASCII   | GS k m n d1...dn |
    /// | Hex     | 1D 6B m n d1...dn |
    ///
    /// The caller guarantees `data.len() <= 255`.
    pub fn print(type_byte: u8, data: &[u8]) -> Vec<u8> {
        let mut cmd = Vec::with_capacity(4 + data.len());
        cmd.extend([GS, b'k', type_byte, data.len() as u8]);
        cmd.extend_from_slice(data);
        cmd
    }
}

// ============================================================================
// QR CODES
// ============================================================================

pub mod qr {
    use super::super::commands::GS;

    /// Largest payload accepted by function 80 (`pL + 256*pH - 3`).
    pub const MAX_DATA: usize = 7089;

    /// Power-on module size in dots.
    pub const DEFAULT_MODULE: u8 = 3;

    /// QR error correction level
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrErrorLevel {
        /// ~7% recovery
        #[default]
        L = 0,
        /// ~15% recovery
        M = 1,
        /// ~25% recovery
        Q = 2,
        /// ~30% recovery
        H = 3,
    }

    impl QrErrorLevel {
        /// Parse an upper-case level letter.
        pub fn from_letter(s: &str) -> Option<Self> {
            match s {
                "L" => Some(QrErrorLevel::L),
                "M" => Some(QrErrorLevel::M),
                "Q" => Some(QrErrorLevel::Q),
                "H" => Some(QrErrorLevel::H),
                _ => None,
            }
        }

        /// Decode the function 69 parameter (`48..=51` or `0..=3`).
        pub fn from_param(n: u8) -> Option<Self> {
            match n {
                0 | b'0' => Some(QrErrorLevel::L),
                1 | b'1' => Some(QrErrorLevel::M),
                2 | b'2' => Some(QrErrorLevel::Q),
                3 | b'3' => Some(QrErrorLevel::H),
                _ => None,
            }
        }
    }

    /// # Set Module Size (GS ( k 3 0 49 67 n)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B 03 00 31 43 n |
    ///
    /// `n` is the module size in dots, 1-16.
    #[inline]
    pub fn set_module_size(n: u8) -> Vec<u8> {
        vec![GS, b'(', b'k', 3, 0, b'1', 67, n]
    }

    /// # Set Error Correction (GS ( k 3 0 49 69 n)
    ///
    /// `n` is `'0'` + level.
    #[inline]
    pub fn set_error_correction(level: QrErrorLevel) -> Vec<u8> {
        vec![GS, b'(', b'k', 3, 0, b'1', 69, b'0' + level as u8]
    }

    /// # Store Data (GS ( k pL pH 49 80 48 d1...dk)
    ///
    /// `pL + 256*pH = k + 3`. The caller guarantees `data.len() <= MAX_DATA`.
    pub fn store_data(data: &[u8]) -> Vec<u8> {
        let p = data.len() + 3;
        let mut cmd = Vec::with_capacity(8 + data.len());
        cmd.extend([GS, b'(', b'k', (p % 256) as u8, (p / 256) as u8, b'1', 80, b'0']);
        cmd.extend_from_slice(data);
        cmd
    }

    /// # Print Stored Symbol (GS ( k 3 0 49 81 48)
    #[inline]
    pub fn print() -> Vec<u8> {
        vec![GS, b'(', b'k', 3, 0, b'1', 81, b'0']
    }
}
