//! Basic usage example for propolis-primitives
//!
//! This example demonstrates chunk addressing, file addressing and the
//! round trip from inclusion proof back to the file address.

use bytes::Bytes;

use propolis_primitives::bmt::SEGMENT_SIZE;
use propolis_primitives::{Chunk, ChunkedFile, file_address_from_inclusion_proof, span_value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Propolis Primitives Example");
    println!("===========================\n");

    println!("1. Chunk Addressing Example");
    println!("---------------------------");
    chunk_example()?;

    println!("\n2. File Addressing Example");
    println!("--------------------------");
    file_example()?;

    println!("\n3. Inclusion Proof Example");
    println!("--------------------------");
    proof_example()?;

    Ok(())
}

fn chunk_example() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"This is a test of the content-addressed chunk system.".to_vec();
    let chunk = Chunk::new(data)?;

    println!("Created chunk:");
    println!("  - Payload: \"{}\"", String::from_utf8_lossy(chunk.payload()));
    println!("  - Size: {} bytes", chunk.size());
    println!("  - Span: {}", chunk.span());
    println!("  - Address: {}", chunk.address());

    // Convert to wire bytes and back
    let bytes: Bytes = chunk.clone().into();
    println!("\nSerialized to {} bytes", bytes.len());

    let parsed = Chunk::try_from(bytes)?;
    assert_eq!(chunk.address(), parsed.address());
    println!("Deserialized; addresses match");

    Ok(())
}

fn file_example() -> Result<(), Box<dyn std::error::Error>> {
    // A payload with a carrier chunk: 129 leaves, the last one short
    let payload: Vec<u8> = (0..128 * 4096 + 33).map(|i| (i % 251) as u8).collect();
    let file = ChunkedFile::new(payload)?;

    println!("Chunked file:");
    println!("  - Length: {} bytes", span_value(&file.span()));
    println!("  - Leaf chunks: {}", file.leaf_chunks().len());
    println!("  - Tree levels: {}", file.bmt().len());
    println!("  - Address: {}", file.address());

    for (k, level) in file.bmt().iter().enumerate() {
        println!("  - Level {}: {} chunk(s)", k, level.len());
    }

    Ok(())
}

fn proof_example() -> Result<(), Box<dyn std::error::Error>> {
    let payload: Vec<u8> = (0..128 * 4096 + 33).map(|i| (i % 251) as u8).collect();
    let file = ChunkedFile::new(payload.clone())?;

    // Prove the very last segment, which sits in the carried leaf
    let segment_index = (payload.len() as u64 - 1) / SEGMENT_SIZE as u64;
    let proof = file.inclusion_proof(segment_index)?;
    println!("Proof for segment {}: {} record(s)", segment_index, proof.len());

    // Zero-pad the trailing segment and rebuild the address from the proof
    let start = segment_index as usize * SEGMENT_SIZE;
    let mut segment = [0u8; SEGMENT_SIZE];
    segment[..payload.len() - start].copy_from_slice(&payload[start..]);

    let rebuilt = file_address_from_inclusion_proof(&proof, &segment, segment_index)?;
    assert_eq!(&rebuilt, file.address());
    println!("Rebuilt file address from the proof: {rebuilt}");

    Ok(())
}
