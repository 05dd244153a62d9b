use frame_inspect::{
    BorrowedFrame, PixelFormat, Size, average_luma, bytes_per_row, is_valid, plane_buffer,
    plane_count, to_bytes,
};

fn main() {
    env_logger::init();

    let size = Size {
        width: 8,
        height: 4,
    };
    // Y rows padded to a 12-byte stride, quarter-size U and V planes.
    let y: Vec<u8> = (0..12 * 4).map(|i| (i * 5) as u8).collect();
    let u = vec![128u8; 6 * 2];
    let v = vec![128u8; 6 * 2];

    let mut frame = BorrowedFrame::new(PixelFormat::Yuv420, size)
        .with_plane(&y, 12)
        .with_plane(&u, 6)
        .with_plane(&v, 6);

    println!("valid: {}", is_valid(&frame));
    println!("planes: {:?}", plane_count(&frame));
    println!("bytes per row: {:?}", bytes_per_row(&frame));
    println!("average luma: {:?}", average_luma(&frame));

    match plane_buffer(&frame, 1) {
        Ok(mut buffer) => println!("plane 1: {} bytes", to_bytes(&mut buffer).len()),
        Err(e) => println!("plane 1: {e}"),
    }

    frame.release();
    println!("\nAfter release:");
    println!("valid: {}", is_valid(&frame));
    match average_luma(&frame) {
        Ok(luma) => println!("average luma: {luma}"),
        Err(e) => println!("average luma: {e}"),
    }
}
