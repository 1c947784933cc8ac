use std::io;

use fat32::error::Error;
use fat32::types::ClusterID;
use fat32::FAT32;
use pretty_hex::pretty_hex;

use crate::partition::Partition;

pub fn info(fat32: &FAT32<Partition>) {
    let geometry = fat32.geometry();
    println!("Bytes per sector:    {}", geometry.bytes_per_sector);
    println!("Sectors per cluster: {}", geometry.sectors_per_cluster);
    println!("Reserved sectors:    {}", geometry.reserved_sectors);
    println!("Number of FATs:      {}", geometry.number_of_fats);
    println!("FAT size:            {} sectors", geometry.fat_size);
    println!("Total sectors:       {}", geometry.total_sectors);
    println!("First data sector:   {}", geometry.first_data_sector());
    println!("Cluster count:       {}", geometry.cluster_count());
    println!("Root cluster:        {}", geometry.root_cluster);
}

/// Hex dump of a single cluster followed by its chain
pub fn dump(fat32: &mut FAT32<Partition>, cluster: u32) -> Result<(), Error<io::Error>> {
    let cluster = ClusterID::from(cluster);
    let mut reader = fat32.cluster_reader();
    let bytes = reader.read_cluster(cluster)?;
    println!("{}", pretty_hex(&bytes));
    let chain: Result<Vec<ClusterID>, _> = reader.clusters(cluster).collect();
    let chain: Vec<String> = chain?.iter().map(|cluster| cluster.to_string()).collect();
    println!("Chain: {}", chain.join(" -> "));
    Ok(())
}
