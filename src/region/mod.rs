/// Boot region, BIOS parameter block of the volume
/// `reserved sectors` sectors, sector 0 holds the BPB
pub(crate) mod boot;

/// FAT region, one 32-bit entry per cluster
/// (`number of fats` * `fat size`) sectors after the reserved sectors
pub(crate) mod fat;

/// Data region, clusters holding directories and files
pub(crate) mod data;
