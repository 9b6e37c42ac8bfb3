use crate::bit_buffer::{get_bit, BitBuffer};
use crate::ecl::Ecl;
use crate::error::QrError;
use crate::finder_penalty::RunHistory;
use crate::mask::Mask;
use crate::reed_solomon;
use crate::version::Version;
use crate::{
    ECC_CODEWORDS_PER_BLOCK, NUM_ERROR_CORRECTION_BLOCKS, PENALTY_N1, PENALTY_N2, PENALTY_N3,
    PENALTY_N4,
};

/// A QR Code symbol: an immutable square grid of dark and light modules
/// holding one byte-mode payload.
///
/// A symbol is built in one shot by [`Symbol::encode`] or
/// [`Symbol::encode_in_range`]; afterwards only the read accessors remain.
/// Construction owns all of its state, so separate encodes never interact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    version: Version,

    // Side length of the grid in modules, 4·version + 17.
    size: i32,

    // The level actually encoded, possibly stronger than requested.
    ecl: Ecl,

    // The mask selected by penalty scoring.
    mask: Mask,

    // Module colors, row-major (false = light, true = dark).
    modules: Vec<bool>,

    // Cells owned by function patterns or reserved regions; payload and
    // mask never touch these. Dropped once construction finishes.
    isfunction: Vec<bool>,
}

impl Symbol {
    /*---- Encoding entry points ----*/

    /// Encodes `data` as a byte-mode symbol, searching every version.
    ///
    /// The smallest version that fits is chosen, then the error correction
    /// level is raised as far as the spare capacity at that version allows
    /// (never below `ecl`).
    pub fn encode(data: &[u8], ecl: Ecl) -> Result<Self, QrError> {
        Self::encode_in_range(data, Version::MIN, Version::MAX, ecl)
    }

    /// Encodes `data` with the version constrained to
    /// `minversion..=maxversion`.
    ///
    /// Fails with [`QrError::DataOverCapacity`] when the payload does not
    /// fit at `maxversion` under `ecl`.
    pub fn encode_in_range(
        data: &[u8],
        minversion: Version,
        maxversion: Version,
        ecl: Ecl,
    ) -> Result<Self, QrError> {
        if minversion > maxversion {
            return Err(QrError::Invariant("minversion exceeds maxversion"));
        }

        // Smallest version whose capacity at the caller's level holds the
        // segment header plus payload.
        let mut version = minversion;
        let used: usize = loop {
            let capacity = Self::data_capacity(version, ecl) * 8;
            let used = used_bits(data.len(), version);
            if used <= capacity {
                break used;
            }
            if version >= maxversion {
                return Err(QrError::DataOverCapacity {
                    needed: used,
                    capacity,
                });
            }
            version = Version::new(version.value() + 1)?;
        };

        // Raise the level as far as the spare room at this version allows.
        // The scan cannot land below `ecl`, because `ecl` itself fits here
        // and the count field width depends only on the version.
        let mut chosen = ecl;
        for level in [Ecl::High, Ecl::Quartile, Ecl::Medium, Ecl::Low] {
            if used <= Self::data_capacity(version, level) * 8 {
                chosen = level;
                break;
            }
        }
        let ecl = chosen;

        let codewords = build_codewords(data, version, ecl)?;
        Self::with_codewords(version, ecl, &codewords)
    }

    // Builds the module grid around prepared data codewords: function
    // patterns, ECC, placement, then mask selection.
    fn with_codewords(version: Version, ecl: Ecl, datacodewords: &[u8]) -> Result<Self, QrError> {
        let size = i32::from(version.value()) * 4 + 17;
        let area = (size * size) as usize;
        let mut sym = Self {
            version,
            size,
            ecl,
            mask: Mask::new(0), // replaced once selection has run
            modules: vec![false; area],
            isfunction: vec![false; area],
        };

        sym.draw_function_patterns();
        let interleaved = interleave_with_ecc(version, ecl, datacodewords)?;
        sym.draw_codewords(&interleaved)?;

        // Score all eight candidates; ties fall to the lower index. Format
        // bits are part of the scored grid, so they are drawn per
        // candidate and the mask XOR is undone after each probe.
        let mut best = Mask::new(0);
        let mut minpenalty = i32::MAX;
        for m in 0..8u8 {
            let m = Mask::new(m);
            sym.apply_mask(m);
            sym.draw_format_bits(m);
            let penalty = sym.penalty_score();
            if penalty < minpenalty {
                best = m;
                minpenalty = penalty;
            }
            sym.apply_mask(m); // XOR undoes itself
        }
        sym.mask = best;
        sym.apply_mask(best);
        sym.draw_format_bits(best);

        sym.isfunction.clear();
        sym.isfunction.shrink_to_fit();
        Ok(sym)
    }

    /*---- Read accessors ----*/

    /// Returns this symbol's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the side length of the module grid, `4·version + 17`.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns the error correction level actually encoded, which may be
    /// stronger than the one requested.
    pub fn ecl(&self) -> Ecl {
        self.ecl
    }

    /// Returns the mask pattern selected by penalty scoring.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module at (x, y): true for dark.
    ///
    /// The top left corner is (0, 0). Coordinates outside the grid read as
    /// light, so callers can paint a quiet zone without bounds checks.
    pub fn module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y) && self.module_at(x, y)
    }

    // In-bounds module read.
    fn module_at(&self, x: i32, y: i32) -> bool {
        self.modules[(y * self.size + x) as usize]
    }

    fn module_mut(&mut self, x: i32, y: i32) -> &mut bool {
        &mut self.modules[(y * self.size + x) as usize]
    }

    /*---- Capacity queries ----*/

    /// Number of payload bytes a symbol of this version and level can hold
    /// before error correction is added.
    pub fn data_capacity(version: Version, ecl: Ecl) -> usize {
        Self::raw_capacity_bits(version) / 8
            - table_get(&ECC_CODEWORDS_PER_BLOCK, version, ecl)
                * table_get(&NUM_ERROR_CORRECTION_BLOCKS, version, ecl)
    }

    /// Number of modules left for codewords once every function pattern is
    /// placed. Includes the 0–7 remainder bits, so not always a multiple
    /// of 8.
    pub fn raw_capacity_bits(version: Version) -> usize {
        let v = usize::from(version.value());
        let mut bits = (16 * v + 128) * v + 64;
        if v >= 2 {
            let n = v / 7 + 2;
            bits -= (25 * n - 10) * n - 55;
            if v >= 7 {
                bits -= 36;
            }
        }
        bits
    }

    /*---- Function patterns ----*/

    // Paints every function pattern and reserves the format regions; cells
    // written here are flagged so payload and mask skip them.
    fn draw_function_patterns(&mut self) {
        let size = self.size;

        // Timing tracks along row 6 and column 6.
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        // Finder glyphs and separators in three corners; they overwrite
        // the ends of the timing tracks.
        self.draw_finder_pattern(0, 0);
        self.draw_finder_pattern(size - 7, 0);
        self.draw_finder_pattern(0, size - 7);

        // Alignment grid for version 2 and up, skipping the three centers
        // that would collide with finder corners.
        let centers = alignment_positions(self.version);
        let n = centers.len();
        for i in 0..n {
            for j in 0..n {
                if i == 0 && j == 0 || i == 0 && j == n - 1 || i == n - 1 && j == 0 {
                    continue;
                }
                self.draw_alignment_pattern(centers[i], centers[j]);
            }
        }

        // Reserve the format regions with a placeholder mask; the real
        // bits land after mask selection.
        self.draw_format_bits(Mask::new(0));
        self.draw_version_bits();
    }

    // One finder glyph plus its separator, drawn over the 9x9 footprint
    // around the 7x7 glyph whose top left corner is (x, y). Cells falling
    // outside the grid are clipped.
    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        for dy in -1..8 {
            for dx in -1..8 {
                let xx = x + dx;
                let yy = y + dy;
                if !(0..self.size).contains(&xx) || !(0..self.size).contains(&yy) {
                    continue;
                }
                let in_glyph = (0..7).contains(&dx) && (0..7).contains(&dy);
                let ring = dx == 0 || dx == 6 || dy == 0 || dy == 6;
                let center = (2..=4).contains(&dx) && (2..=4).contains(&dy);
                self.set_function_module(xx, yy, in_glyph && (ring || center));
            }
        }
    }

    // A 5x5 alignment pattern centered at (x, y): dark except the ring at
    // Chebyshev distance 1. All cells must be in bounds.
    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                self.set_function_module(x + dx, y + dy, std::cmp::max(dx.abs(), dy.abs()) != 1);
            }
        }
    }

    // Both copies of the format information for the given mask, protected
    // by BCH(15,5) and XORed with 0x5412, plus the always-dark module.
    fn draw_format_bits(&mut self, mask: Mask) {
        let bits: u32 = {
            // Level is 2 bits, mask is 3; ten remainder bits follow.
            let data = u32::from(self.ecl.format_bits() << 3 | mask.value());
            let mut rem = data;
            for _ in 0..10 {
                rem = (rem << 1) ^ ((rem >> 9) * 0x537);
            }
            (data << 10 | rem) ^ 0x5412
        };
        debug_assert_eq!(bits >> 15, 0);

        // First copy, wrapped around the top left finder.
        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i));
        }

        // Second copy, split between the top right and bottom left edges.
        let size = self.size;
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i));
        }
        self.set_function_module(8, size - 8, true); // dark module
    }

    // Version information for versions 7 and up: the 6-bit version number
    // extended by a 12-bit BCH remainder, mirrored into the two 3x6
    // rectangles next to the top right and bottom left finders.
    fn draw_version_bits(&mut self) {
        if self.version.value() < 7 {
            return;
        }
        let bits: u32 = {
            let data = u32::from(self.version.value());
            let mut rem = data;
            for _ in 0..12 {
                rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
            }
            data << 12 | rem
        };
        debug_assert_eq!(bits >> 18, 0);

        for i in 0..18 {
            let bit = get_bit(bits, i);
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    // Sets a module's color and flags it as functional. Coordinates must
    // be in bounds.
    fn set_function_module(&mut self, x: i32, y: i32, dark: bool) {
        *self.module_mut(x, y) = dark;
        self.isfunction[(y * self.size + x) as usize] = true;
    }

    /*---- Codeword placement and masking ----*/

    // Walks the serpentine path through the non-function cells and writes
    // the interleaved codeword bits MSB-first.
    fn draw_codewords(&mut self, data: &[u8]) -> Result<(), QrError> {
        if data.len() != Self::raw_capacity_bits(self.version) / 8 {
            return Err(QrError::Invariant("interleaved stream length mismatch"));
        }

        let mut i: usize = 0; // bit index into data
        let mut right = self.size - 1;
        while right >= 1 {
            // Right column of the current pair; the vertical timing track
            // is not part of any pair.
            if right == 6 {
                right = 5;
            }
            for vert in 0..self.size {
                for j in 0..2 {
                    let x = right - j;
                    let upward = (right + 1) & 2 == 0;
                    let y = if upward { self.size - 1 - vert } else { vert };
                    if !self.isfunction[(y * self.size + x) as usize] && i < data.len() * 8 {
                        *self.module_mut(x, y) =
                            get_bit(u32::from(data[i >> 3]), 7 - ((i as i32) & 7));
                        i += 1;
                    }
                    // Remainder cells (0 to 7 of them) stay light.
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, data.len() * 8);
        Ok(())
    }

    // XORs the mask predicate into every non-function cell. Self-inverse,
    // which the selection loop relies on: exactly one application must
    // remain on a finished symbol.
    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let invert = match mask.value() {
                    0 => (x + y) % 2 == 0,
                    1 => y % 2 == 0,
                    2 => x % 3 == 0,
                    3 => (x + y) % 3 == 0,
                    4 => (x / 3 + y / 2) % 2 == 0,
                    5 => x * y % 2 + x * y % 3 == 0,
                    6 => (x * y % 2 + x * y % 3) % 2 == 0,
                    7 => ((x + y) % 2 + x * y % 3) % 2 == 0,
                    _ => unreachable!(),
                };
                *self.module_mut(x, y) ^= invert & !self.isfunction[(y * self.size + x) as usize];
            }
        }
    }

    // Scores the current grid with the four standard penalty rules; the
    // mask search keeps the minimum.
    fn penalty_score(&self) -> i32 {
        let mut result: i32 = 0;
        let size = self.size;

        // Runs of one color and finder-like sequences along the rows.
        for y in 0..size {
            let mut runcolor = false;
            let mut runlen: i32 = 0;
            let mut history = RunHistory::new(size);
            for x in 0..size {
                if self.module_at(x, y) == runcolor {
                    runlen += 1;
                    if runlen == 5 {
                        result += PENALTY_N1;
                    } else if runlen > 5 {
                        result += 1;
                    }
                } else {
                    history.push(runlen);
                    if !runcolor {
                        result += history.count() * PENALTY_N3;
                    }
                    runcolor = self.module_at(x, y);
                    runlen = 1;
                }
            }
            result += history.finish(runcolor, runlen) * PENALTY_N3;
        }

        // The same along the columns.
        for x in 0..size {
            let mut runcolor = false;
            let mut runlen: i32 = 0;
            let mut history = RunHistory::new(size);
            for y in 0..size {
                if self.module_at(x, y) == runcolor {
                    runlen += 1;
                    if runlen == 5 {
                        result += PENALTY_N1;
                    } else if runlen > 5 {
                        result += 1;
                    }
                } else {
                    history.push(runlen);
                    if !runcolor {
                        result += history.count() * PENALTY_N3;
                    }
                    runcolor = self.module_at(x, y);
                    runlen = 1;
                }
            }
            result += history.finish(runcolor, runlen) * PENALTY_N3;
        }

        // 2x2 blocks of one color.
        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color = self.module_at(x, y);
                if color == self.module_at(x + 1, y)
                    && color == self.module_at(x, y + 1)
                    && color == self.module_at(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        // Deviation of the dark ratio from one half, in 5% steps: the
        // smallest k >= 0 with (45-5k)% <= dark/total <= (55+5k)%.
        let dark: i32 = self.modules.iter().copied().map(i32::from).sum();
        let total = size * size;
        let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        debug_assert!((0..=9).contains(&k));
        result += k * PENALTY_N4;
        result
    }
}

/*---- Layout helpers ----*/

// Header-plus-payload size in bits for a byte-mode segment: 4-bit mode
// indicator, character count, then the data itself.
fn used_bits(datalen: usize, version: Version) -> usize {
    4 + usize::from(char_count_bits(version)) + datalen * 8
}

// Character count width for byte mode: 8 bits through version 9, 16 after.
fn char_count_bits(version: Version) -> u8 {
    if version.value() <= 9 {
        8
    } else {
        16
    }
}

// Byte-mode bit stream for a payload that is known to fit: mode indicator,
// character count, the data itself, terminator, byte alignment, then
// alternating pad bytes up to the data capacity.
fn build_codewords(data: &[u8], version: Version, ecl: Ecl) -> Result<Vec<u8>, QrError> {
    let capacity = Symbol::data_capacity(version, ecl) * 8;
    if used_bits(data.len(), version) > capacity {
        return Err(QrError::Invariant("payload exceeds the selected capacity"));
    }
    let mut bits = BitBuffer::new();
    bits.append_bits(0x4, 4)?;
    bits.append_bits(data.len() as u32, char_count_bits(version))?;
    for &b in data {
        bits.append_bits(u32::from(b), 8)?;
    }
    let terminator = std::cmp::min(4, capacity - bits.len());
    bits.append_bits(0, terminator as u8)?;
    bits.append_bits(0, (bits.len().wrapping_neg() & 7) as u8)?;
    for &pad in [0xEC, 0x11].iter().cycle() {
        if bits.len() >= capacity {
            break;
        }
        bits.append_bits(pad, 8)?;
    }
    bits.to_bytes()
}

// Center coordinates of the alignment stripes, ascending. Empty for
// version 1. The step formula agrees with the standard for every version,
// version 32 included.
fn alignment_positions(version: Version) -> Vec<i32> {
    let v = i32::from(version.value());
    if v == 1 {
        return Vec::new();
    }
    let size = v * 4 + 17;
    let n = v / 7 + 2;
    let step = (v * 8 + n * 3 + 5) / (n * 4 - 4) * 2;
    let mut centers: Vec<i32> = (0..n - 1).map(|k| size - 7 - k * step).collect();
    centers.push(6);
    centers.reverse();
    centers
}

fn table_get(table: &'static [[i8; 41]; 4], version: Version, ecl: Ecl) -> usize {
    table[ecl.ordinal()][usize::from(version.value())] as usize
}

// Splits the data codewords into short and long blocks, appends each
// block's Reed-Solomon codewords, and interleaves everything column-major:
// data columns first, then ECC columns.
fn interleave_with_ecc(version: Version, ecl: Ecl, data: &[u8]) -> Result<Vec<u8>, QrError> {
    if data.len() != Symbol::data_capacity(version, ecl) {
        return Err(QrError::Invariant(
            "codeword count does not match the version capacity",
        ));
    }

    let numblocks = table_get(&NUM_ERROR_CORRECTION_BLOCKS, version, ecl);
    let ecclen = table_get(&ECC_CODEWORDS_PER_BLOCK, version, ecl);
    let rawcodewords = Symbol::raw_capacity_bits(version) / 8;
    let numshortblocks = numblocks - rawcodewords % numblocks;
    let shortblocklen = rawcodewords / numblocks;

    let divisor = reed_solomon::generator(ecclen)?;
    let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(numblocks);
    let mut k: usize = 0;
    for i in 0..numblocks {
        let datlen = shortblocklen - ecclen + usize::from(i >= numshortblocks);
        let mut block = data[k..k + datlen].to_vec();
        k += datlen;
        let ecc = reed_solomon::remainder(&block, &divisor);
        if i < numshortblocks {
            // Placeholder so every block has equal length; never emitted.
            block.push(0);
        }
        block.extend_from_slice(&ecc);
        blocks.push(block);
    }

    let mut out = Vec::with_capacity(rawcodewords);
    for i in 0..=shortblocklen {
        for (j, block) in blocks.iter().enumerate() {
            if i != shortblocklen - ecclen || j >= numshortblocks {
                out.push(block[i]);
            }
        }
    }
    Ok(out)
}
