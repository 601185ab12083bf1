/// Header line marker that opens an ARGOS fix record
pub const HEADER_TOKEN: &str = "Date :";

/// Companion file shipped alongside ARGOS downloads, never parsed
pub const README_FILE: &str = "README.txt";

/// Whitespace token positions on the header line
pub const TAG_ID_TOKEN: usize = 0;
pub const DATE_TOKEN: usize = 3;
pub const TIME_TOKEN: usize = 4;
pub const LOCATION_CLASS_TOKEN: usize = 7;

/// Whitespace token positions on the coordinate line
pub const LATITUDE_TOKEN: usize = 2;
pub const LONGITUDE_TOKEN: usize = 5;

/// Spatial reference codes
pub const EPSG_WGS84: u32 = 4326;
pub const EPSG_WEB_MERCATOR: u32 = 3857;
pub const ESRI_WORLD_EQUIDISTANT_CYLINDRICAL: u32 = 54002;

/// Sphere radii used by the supported projections (metres)
pub const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;
pub const AUTHALIC_RADIUS: f64 = 6_371_000.0;

/// Web Mercator is undefined towards the poles
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_78;

/// Output field names
pub const FIELD_TAG_ID: &str = "TagID";
pub const FIELD_LOCATION_CLASS: &str = "LC";
pub const FIELD_DATE: &str = "Date";
pub const FIELD_X: &str = "X";
pub const FIELD_Y: &str = "Y";

/// Dataset metadata keys
pub const META_SPATIAL_REFERENCE: &str = "spatial_reference";
pub const META_GEOMETRY_TYPE: &str = "geometry_type";
pub const GEOMETRY_POINT: &str = "POINT";

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 8; // 64KB

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
