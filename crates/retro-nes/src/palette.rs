//! The 2C02 master palette: 64 entries, ARGB8888.

pub const PALETTE: [u32; 64] = [
    0xFF66_6666, 0xFF00_2A88, 0xFF14_12A7, 0xFF3B_00A4,
    0xFF5C_007E, 0xFF6E_0040, 0xFF6C_0600, 0xFF56_1D00,
    0xFF33_3500, 0xFF0B_4800, 0xFF00_5200, 0xFF00_4F08,
    0xFF00_404D, 0xFF00_0000, 0xFF00_0000, 0xFF00_0000,

    0xFFAD_ADAD, 0xFF15_5FD9, 0xFF42_40FF, 0xFF75_27FE,
    0xFFA0_1ACC, 0xFFB7_1E7B, 0xFFB5_3120, 0xFF99_4E00,
    0xFF6B_6D00, 0xFF38_8700, 0xFF0C_9300, 0xFF00_8F32,
    0xFF00_7C8D, 0xFF00_0000, 0xFF00_0000, 0xFF00_0000,

    0xFFFF_FFFF, 0xFF64_B0FF, 0xFF92_90FF, 0xFFC6_76FF,
    0xFFF3_6AFF, 0xFFFE_6ECC, 0xFFFE_8170, 0xFFEA_9E22,
    0xFFBC_BE00, 0xFF88_D800, 0xFF5C_E430, 0xFF45_E082,
    0xFF48_CDDE, 0xFF4F_4F4F, 0xFF00_0000, 0xFF00_0000,

    0xFFFF_FFFF, 0xFFC0_DFFF, 0xFFD3_D2FF, 0xFFE8_C8FF,
    0xFFFB_C2FF, 0xFFFE_C4EA, 0xFFFE_CCC5, 0xFFF7_D8A5,
    0xFFE4_E594, 0xFFCF_EF96, 0xFFBD_F4AB, 0xFFB3_F3CC,
    0xFFB5_EBF2, 0xFFB8_B8B8, 0xFF00_0000, 0xFF00_0000,
];
