//! Embedded magic multipliers and index widths, one pair per square.
//!
//! The multipliers are well-known published constants (several of the
//! undersized entries are due to Gerd Isenberg, Grant Osborne, Volker
//! Annuss, Niklas Fiekas and Peter Österlund). They are pure index-space
//! quantities: entry `i` hashes the relevance mask of square index `i`.
//! Their correctness is not assumed — the table build re-derives every
//! attack set from scratch and panics on any mismatch.

/// Rook multipliers, indexed a8..h1.
#[rustfmt::skip]
pub const ROOK_MAGICS: [u64; 64] = [
    0x4080_0020_4000_1480, 0x0040_0010_0140_2000, 0x0300_2000_1810_4100, 0x2100_0409_0110_0120,
    0x8a00_0600_0408_2070, 0x0080_0144_0002_0080, 0x1100_2500_208a_0004, 0x0900_0042_2201_8100,
    0x0208_8002_28c0_0081, 0x2280_4010_0340_2000, 0x0008_8010_0020_0184, 0x0001_0020_1000_0900,
    0x0182_0006_0010_6008, 0x2058_8004_0080_0200, 0x0004_8002_0080_0900, 0x052d_0012_0040_a100,
    0x0540_0880_0080_24c1, 0x2000_8480_4002_2000, 0x0400_4100_1100_6000, 0x0040_a100_3001_0108,
    0x1204_8080_0800_0402, 0x0802_8080_0400_2201, 0x1002_8080_5200_0500, 0x0004_0a00_2112_4184,
    0x0640_0128_8008_8040, 0x8410_4000_8020_008a, 0x0400_2008_8010_0080, 0x2001_0121_0009_1004,
    0x1200_0d01_0008_0010, 0x6004_0004_0120_1008, 0x7500_aa04_0008_4110, 0x0100_0052_0004_0981,
    0x0040_8040_0280_0020, 0x0470_0020_0640_0240, 0x0001_2000_8080_1000, 0x0000_0812_0200_2040,
    0x00c0_8044_0080_0800, 0x9000_800a_0080_0400, 0x0001_0004_0100_0600, 0x0042_1088_ca00_2401,
    0x0000_c000_228d_8000, 0x6410_0420_1440_4001, 0x1002_0040_8226_0014, 0x206a_0088_11c2_0021,
    0x0002_0018_1022_0024, 0x2001_0200_0400_8080, 0x1000_0801_100c_001a, 0x0048_0082_5402_0011,
    0x48ff_fe99_fecf_aa00, 0x48ff_fe99_fecf_aa00, 0x497f_ffad_ff9c_2e00, 0x613f_ffdd_ffce_9200,
    0xffff_ffe9_ffe7_ce00, 0xffff_fff5_fff3_e600, 0x0003_ff95_e5e6_a4c0, 0x510f_fff5_f63c_96a0,
    0xebff_ffb9_ff9f_c526, 0x61ff_fedd_feed_aeae, 0x53bf_ffed_ffde_b1a2, 0x127f_ffb9_ffdf_b5f6,
    0x411f_ffdd_ffdb_f4d6, 0x0822_0024_0810_4502, 0x0003_ffef_27ee_be74, 0x7645_fffe_cbfe_a79e,
];

/// Bishop multipliers, indexed a8..h1.
#[rustfmt::skip]
pub const BISHOP_MAGICS: [u64; 64] = [
    0xffed_f9fd_7cfc_ffff, 0xfc09_6285_4a77_f576, 0x0012_2808_c102_a004, 0x2851_2400_8240_0440,
    0x0011_1040_1100_0202, 0x0008_2208_2000_0010, 0xfc0a_66c6_4a7e_f576, 0x7ffd_fdfc_bd79_ffff,
    0xfc08_46a6_4a34_fff6, 0xfc08_7a87_4a3c_f7f6, 0x0009_8802_0420_a000, 0x8000_4404_0080_8200,
    0x208c_8450_c001_3407, 0x1980_1105_2010_8030, 0xfc08_64ae_59b4_ff76, 0x3c08_60af_4b35_ff76,
    0x73c0_1af5_6cf4_cffb, 0x41a0_1cfa_d64a_affc, 0x0604_0002_04a2_0202, 0x0002_8208_0602_4000,
    0x008a_0024_2201_0201, 0x2082_0040_8801_0802, 0x7c0c_028f_5b34_ff76, 0xfc0a_028e_5ab4_df76,
    0x0810_0420_d104_1080, 0x0904_5100_0210_0100, 0x0202_2808_0406_4403, 0x004c_0040_0c03_0082,
    0x0602_0010_0200_5011, 0x7209_0200_c108_9000, 0x4211_4104_2400_8805, 0x0002_8484_2126_0804,
    0xc001_0412_1121_2004, 0x0208_0188_0004_4800, 0x0080_2064_1058_0800, 0x0000_2011_0008_0084,
    0x0208_0034_0009_4100, 0x2190_4102_0000_4058, 0x0188_8214_0180_8080, 0x2006_0a02_0000_c4c0,
    0xdcef_d9b5_4bfc_c09f, 0xf95f_fa76_5afd_602b, 0x200a_1041_1000_2040, 0x0800_000c_0831_0c00,
    0x0218_0401_0a01_0400, 0x1092_2004_0022_4100, 0x43ff_9a5c_f4ca_0c01, 0x4bff_cd8e_7c58_7601,
    0xfc0f_f286_5334_f576, 0xfc0b_f6ce_5924_f576, 0x8052_2060_8c30_0001, 0x2084_1050_4202_0400,
    0xe018_8010_2206_0220, 0x0001_1220_4901_0200, 0xc3ff_b7dc_36ca_8c89, 0xc3ff_8a54_f4ca_2c89,
    0xffff_fcfc_fd79_edff, 0xfc08_63fc_cb14_7576, 0x40a0_0400_6213_3000, 0x0142_0280_0084_0400,
    0x0009_0900_1006_1200, 0x0800_8445_2810_0308, 0xfc08_7e8e_4bb2_f736, 0x43ff_9e4e_f4ca_2c89,
];

/// Table index widths per square for rooks. Most equal the relevance-mask
/// population count; a handful are one smaller thanks to the constructive
/// collisions of the corresponding multipliers above.
#[rustfmt::skip]
pub const ROOK_INDEX_BITS: [u8; 64] = [
    12, 11, 11, 11, 11, 11, 11, 12,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    10,  9,  9,  9,  9,  9,  9, 10,
    11, 10, 10, 10, 10, 11, 10, 11,
];

/// Table index widths per square for bishops.
#[rustfmt::skip]
pub const BISHOP_INDEX_BITS: [u8; 64] = [
    5, 4, 5, 5, 5, 5, 4, 5,
    4, 4, 5, 5, 5, 5, 4, 4,
    4, 4, 7, 7, 7, 7, 4, 4,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    4, 4, 7, 7, 7, 7, 4, 4,
    4, 4, 5, 5, 5, 5, 4, 4,
    5, 4, 5, 5, 5, 5, 4, 5,
];
