//! Spectrum-to-note binning.
//!
//! Bins are walked in ascending order against the note table. Each note
//! collects every bin whose center frequency is below its threshold and at or
//! above the previous note's threshold; its intensity is the mean magnitude of
//! those bins.
//!
//! ```text
//! bins:   |0 |1 |2 |3 |4 |5 |6 |7 |8 |9 |
//! notes:  [ n0  )[ n1  )[ n2  )[n3)        leftover bins 8..9 ignored
//! ```
//!
//! A note that receives no bins (narrower than one bin) reports 0. A note is
//! only written when a bin reaches its threshold: bins above the last
//! threshold are dropped, and if the spectrum ends first the note in progress
//! and every later note stay at 0.

use std::sync::Arc;

use crate::analysis::{notes::NoteTable, transform::bin_frequency};

pub struct NoteBinner {
    table: Arc<NoteTable>,
    sample_rate: f32,
    window_size: usize,
}

impl NoteBinner {
    pub fn new(table: Arc<NoteTable>, sample_rate: f32, window_size: usize) -> Self {
        Self {
            table,
            sample_rate,
            window_size,
        }
    }

    pub fn table(&self) -> &NoteTable {
        &self.table
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Fold `magnitudes` into per-note mean intensities.
    ///
    /// `intensities` is zeroed first; entries beyond the note table are left at 0.
    pub fn bin(&self, magnitudes: &[f32], intensities: &mut [f32]) {
        intensities.fill(0.0);

        let notes = self.table.len().min(intensities.len());
        let mut note = 0;
        let mut sum = 0.0f32;
        let mut count = 0usize;

        for (bin, &magnitude) in magnitudes.iter().enumerate() {
            let freq = bin_frequency(bin, self.sample_rate, self.window_size);

            // Close every note whose edge this bin has reached.
            while note < notes && freq >= self.table.threshold(note) {
                intensities[note] = mean(sum, count);
                sum = 0.0;
                count = 0;
                note += 1;
            }
            if note == notes {
                return;
            }

            sum += magnitude;
            count += 1;
        }
    }
}

/// Bin-indexed mapping: one intensity per magnitude bin, no note folding.
pub fn bin_indexed(magnitudes: &[f32], intensities: &mut [f32]) {
    let n = magnitudes.len().min(intensities.len());
    intensities[..n].copy_from_slice(&magnitudes[..n]);
    intensities[n..].fill(0.0);
}

#[inline]
fn mean(sum: f32, count: usize) -> f32 {
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 20-point window at 1 kHz: bins 50 Hz apart, 10 bins (0..=450 Hz).
    const SR: f32 = 1_000.0;
    const N: usize = 20;

    fn binner(thresholds: &[f32]) -> NoteBinner {
        let table = NoteTable::from_thresholds(thresholds.to_vec()).unwrap();
        NoteBinner::new(Arc::new(table), SR, N)
    }

    #[test]
    fn test_note_gets_mean_of_its_bins_only() {
        let binner = binner(&[100.0, 200.0, 300.0, 400.0]);
        // Note 2 covers [200, 300) Hz = bins 4 and 5.
        let mut mags = vec![0.0; N / 2];
        mags[4] = 2.0;
        mags[5] = 4.0;
        let mut out = vec![9.0; 4];

        binner.bin(&mags, &mut out);

        assert_eq!(out, vec![0.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn test_partition_covers_each_bin_once() {
        let binner = binner(&[100.0, 200.0, 300.0, 400.0]);
        let mags: Vec<f32> = (0..N / 2).map(|i| i as f32).collect();
        let mut out = vec![0.0; 4];

        binner.bin(&mags, &mut out);

        // [0,1] [2,3] [4,5] [6,7]; 8 and 9 are past the last edge
        assert_eq!(out, vec![0.5, 2.5, 4.5, 6.5]);
    }

    #[test]
    fn test_empty_note_is_zero() {
        // Note 2 spans [120, 140) Hz, which holds no bin center.
        let binner = binner(&[100.0, 120.0, 140.0, 200.0]);
        let mags = vec![1.0; N / 2];
        let mut out = vec![0.0; 4];

        binner.bin(&mags, &mut out);

        assert_eq!(out[2], 0.0);
        assert!(out.iter().all(|v| v.is_finite()));
        assert_eq!(out, vec![1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_leftover_bins_ignored() {
        let binner = binner(&[100.0, 200.0]);
        let mut mags = vec![0.0; N / 2];
        mags[9] = 100.0;
        let mut out = vec![0.0; 2];

        binner.bin(&mags, &mut out);

        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn test_note_cut_off_by_spectrum_end_stays_zero() {
        // Note 1 spans [100, 1000) Hz but the spectrum stops at 450 Hz.
        let mags = vec![2.0; N / 2];

        let mut out = vec![5.0; 3];
        binner(&[100.0, 1_000.0, 2_000.0]).bin(&mags, &mut out);
        assert_eq!(out, vec![2.0, 0.0, 0.0]);

        let mut out = vec![5.0; 2];
        binner(&[100.0, 1_000.0]).bin(&mags, &mut out);
        assert_eq!(out, vec![2.0, 0.0]);
    }

    #[test]
    fn test_equal_tempered_table_places_bin() {
        // 48 kHz / 1024: bin 10 is 468.75 Hz, inside A#4's band (note 70).
        let binner = NoteBinner::new(Arc::new(NoteTable::equal_tempered()), 48_000.0, 1024);
        let mut mags = vec![0.0; 512];
        mags[10] = 0.8;
        let mut out = vec![0.0; 128];

        binner.bin(&mags, &mut out);

        assert_eq!(out[70], 0.8);
        assert_eq!(out.iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn test_bin_indexed_copies_and_pads() {
        let mut out = vec![7.0; 4];
        bin_indexed(&[1.0, 2.0], &mut out);
        assert_eq!(out, vec![1.0, 2.0, 0.0, 0.0]);
    }
}
