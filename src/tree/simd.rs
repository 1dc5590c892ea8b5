// Copyright 2022 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Implementation of vectorized scans over node key arrays.
//!
//! Two operations are provided for each of the two fixed vector widths
//! used by the node family:
//!
//! * find-equal: the position of the first occurrence of an octet among
//!   the first `width` entries; and
//! * find-greater: the position of the first entry strictly greater
//!   than an octet among the first `width` entries (the insertion point
//!   for sorted nodes).
//!
//! Comparisons are unsigned. On x86-64 the 16-octet scans use SSE2
//! (part of the baseline instruction set) and the 32-octet scans use
//! AVX2 when the CPU supports it; x86 byte compares are signed, so the
//! greater-than scans flip the sign bit of both operands before
//! comparing. All other targets, and x86-64 CPUs without AVX2, use
//! scalar fallbacks with identical semantics.

use cfg_if::cfg_if;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        /// Returns whether the 32-octet vectorized scans (and therefore
        /// the node layout that relies on them) are available on this
        /// CPU.
        pub(crate) fn have_avx2() -> bool {
            is_x86_feature_detected!("avx2")
        }

        /// Returns the position of the first occurrence of `octet`
        /// among `vec[..width]`, if any.
        pub(crate) fn find_eq_16(octet: u8, vec: &[u8; 16], width: u8) -> Option<usize> {
            // SAFETY: SSE2 is part of the x86-64 baseline.
            unsafe { find_eq_16_sse2(octet, vec, width) }
        }

        /// Returns the position of the first entry strictly greater
        /// than `octet` among `vec[..width]`, if any.
        pub(crate) fn find_gt_16(octet: u8, vec: &[u8; 16], width: u8) -> Option<usize> {
            // SAFETY: SSE2 is part of the x86-64 baseline.
            unsafe { find_gt_16_sse2(octet, vec, width) }
        }
    } else {
        /// Returns whether the 32-octet vectorized scans (and therefore
        /// the node layout that relies on them) are available on this
        /// CPU.
        pub(crate) fn have_avx2() -> bool {
            false
        }

        /// Returns the position of the first occurrence of `octet`
        /// among `vec[..width]`, if any.
        pub(crate) fn find_eq_16(octet: u8, vec: &[u8; 16], width: u8) -> Option<usize> {
            find_eq_scalar(octet, &vec[..], width)
        }

        /// Returns the position of the first entry strictly greater
        /// than `octet` among `vec[..width]`, if any.
        pub(crate) fn find_gt_16(octet: u8, vec: &[u8; 16], width: u8) -> Option<usize> {
            find_gt_scalar(octet, &vec[..], width)
        }
    }
}

/// The 32-octet variant of [`find_eq_16`].
pub(crate) fn find_eq_32(octet: u8, vec: &[u8; 32], width: u8) -> Option<usize> {
    #[cfg(target_arch = "x86_64")]
    if is_x86_feature_detected!("avx2") {
        // SAFETY: AVX2 support was just checked.
        return unsafe { find_eq_32_avx2(octet, vec, width) };
    }
    find_eq_scalar(octet, &vec[..], width)
}

/// The 32-octet variant of [`find_gt_16`].
pub(crate) fn find_gt_32(octet: u8, vec: &[u8; 32], width: u8) -> Option<usize> {
    #[cfg(target_arch = "x86_64")]
    if is_x86_feature_detected!("avx2") {
        // SAFETY: AVX2 support was just checked.
        return unsafe { find_gt_32_avx2(octet, vec, width) };
    }
    find_gt_scalar(octet, &vec[..], width)
}

////////////////////////////////////////////////////////////////////////
// SCALAR FALLBACKS                                                   //
////////////////////////////////////////////////////////////////////////

fn find_eq_scalar(octet: u8, vec: &[u8], width: u8) -> Option<usize> {
    let width = (width as usize).min(vec.len());
    vec[..width].iter().position(|&entry| entry == octet)
}

fn find_gt_scalar(octet: u8, vec: &[u8], width: u8) -> Option<usize> {
    let width = (width as usize).min(vec.len());
    vec[..width].iter().position(|&entry| entry > octet)
}

////////////////////////////////////////////////////////////////////////
// X86-64 IMPLEMENTATIONS                                             //
////////////////////////////////////////////////////////////////////////

/// Returns a bitmap with the low `width` bits set, used to discard
/// compare results beyond the active portion of a vector.
#[cfg(target_arch = "x86_64")]
fn active_mask(width: u8, lanes: u8) -> u32 {
    let bits = width.min(lanes);
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

#[cfg(target_arch = "x86_64")]
unsafe fn find_eq_16_sse2(octet: u8, vec: &[u8; 16], width: u8) -> Option<usize> {
    let cmp = _mm_cmpeq_epi8(
        _mm_set1_epi8(octet as i8),
        _mm_loadu_si128(vec.as_ptr() as *const __m128i),
    );
    let bitmap = (_mm_movemask_epi8(cmp) as u32) & active_mask(width, 16);
    if bitmap == 0 {
        None
    } else {
        Some(bitmap.trailing_zeros() as usize)
    }
}

#[cfg(target_arch = "x86_64")]
unsafe fn find_gt_16_sse2(octet: u8, vec: &[u8; 16], width: u8) -> Option<usize> {
    // _mm_cmpgt_epi8 is a signed compare; flipping the sign bit of both
    // operands turns it into an unsigned one.
    let bias = _mm_set1_epi8(0x80u8 as i8);
    let cmp = _mm_cmpgt_epi8(
        _mm_xor_si128(_mm_loadu_si128(vec.as_ptr() as *const __m128i), bias),
        _mm_xor_si128(_mm_set1_epi8(octet as i8), bias),
    );
    let bitmap = (_mm_movemask_epi8(cmp) as u32) & active_mask(width, 16);
    if bitmap == 0 {
        None
    } else {
        Some(bitmap.trailing_zeros() as usize)
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn find_eq_32_avx2(octet: u8, vec: &[u8; 32], width: u8) -> Option<usize> {
    let cmp = _mm256_cmpeq_epi8(
        _mm256_set1_epi8(octet as i8),
        _mm256_loadu_si256(vec.as_ptr() as *const __m256i),
    );
    let bitmap = (_mm256_movemask_epi8(cmp) as u32) & active_mask(width, 32);
    if bitmap == 0 {
        None
    } else {
        Some(bitmap.trailing_zeros() as usize)
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn find_gt_32_avx2(octet: u8, vec: &[u8; 32], width: u8) -> Option<usize> {
    // See find_gt_16_sse2 for the sign-bit trick.
    let bias = _mm256_set1_epi8(0x80u8 as i8);
    let cmp = _mm256_cmpgt_epi8(
        _mm256_xor_si256(_mm256_loadu_si256(vec.as_ptr() as *const __m256i), bias),
        _mm256_xor_si256(_mm256_set1_epi8(octet as i8), bias),
    );
    let bitmap = (_mm256_movemask_epi8(cmp) as u32) & active_mask(width, 32);
    if bitmap == 0 {
        None
    } else {
        Some(bitmap.trailing_zeros() as usize)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
