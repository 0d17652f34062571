use celestial_skyindex::{
    Cone, CoordinateFrame, HealpixGrid, IndexConfig, IndexFactory, IndexResult, IndexScheme, Polygon,
    Shape, SphericalPoint,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let scheme: IndexScheme = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "NESTED".to_string())
        .parse()?;

    let grid = HealpixGrid::new(12)?;
    let factory = IndexFactory::new(&grid, IndexConfig::default())?;

    let orion = SphericalPoint::equatorial(83.633, -5.375)?;
    let cone = Cone::from_degrees(orion, 0.5)?;
    let footprint = Polygon::from_coordinates(
        CoordinateFrame::Equatorial,
        &[(82.0, -7.0), (85.0, -7.0), (85.0, -4.0), (82.0, -4.0)],
    )?;

    let shapes: [(&str, Shape); 4] = [
        ("point", orion.into()),
        ("cone", cone.into()),
        ("footprint", footprint.clone().into()),
        ("outside footprint", footprint.reversed().into()),
    ];

    for (name, shape) in shapes {
        let result = factory.index(shape, scheme)?;
        println!(
            "{name:>18}: order {:>2}, {} pixels",
            result.order(),
            result.pixel_count()
        );
        match &result {
            IndexResult::Pixel { pixel, scheme, .. } => println!("{:>18}  {scheme} {pixel}", ""),
            IndexResult::Ranges { ranges, .. } if ranges.range_count() <= 8 => {
                println!("{:>18}  {ranges}", "")
            }
            IndexResult::Coverage(map) => {
                let cells = map.normalized();
                println!("{:>18}  {} normalized cells", "", cells.len());
            }
            IndexResult::Ranges { ranges, .. } => {
                println!("{:>18}  {} ranges", "", ranges.range_count())
            }
        }
    }

    Ok(())
}
