#![no_std]
// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.
#![no_main]
#![allow(clippy::empty_loop)]

use core::convert::Infallible;
use core::fmt::Write;
use cortex_m_rt::entry;
use dotdash_core::{ByteSink, MorseWriter};
use panic_halt as _;

// USART1 on STM32F103: SR at 0x00, DR at 0x04
const USART1_BASE: u32 = 0x4001_3800;
const USART1_SR: *const u32 = USART1_BASE as *const u32;
const USART1_DR: *mut u32 = (USART1_BASE + 0x04) as *mut u32;

const SR_TXE: u32 = 1 << 7;

/// Blocking transmitter on the USART1 data register.
struct Usart1;

impl ByteSink for Usart1 {
    type Error = Infallible;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        for &byte in bytes {
            unsafe {
                while core::ptr::read_volatile(USART1_SR) & SR_TXE == 0 {}
                core::ptr::write_volatile(USART1_DR, byte as u32);
            }
        }
        Ok(bytes.len())
    }
}

#[entry]
fn main() -> ! {
    let mut uart = Usart1;

    loop {
        let mut morse = MorseWriter::new(&mut uart);
        // Infallible sink: the only error write! can report is a formatter one.
        let _ = writeln!(morse, "SOS");
        let _ = writeln!(morse, "Hello from dotdash");

        for _ in 0..500_000 {
            cortex_m::asm::nop();
        }
    }
}
