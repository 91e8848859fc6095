// Vendor endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.ip2location.com/download";
pub const TOKEN_QUERY_PARAM: &str = "token";
pub const FILE_QUERY_PARAM: &str = "file";

// Sentinel bodies returned in place of an archive
pub const DOWNLOAD_LIMIT_MARKER: &str = "THIS FILE CAN ONLY BE DOWNLOADED";
pub const NO_PERMISSION_MARKER: &str = "NO PERMISSION";

// Streaming
pub const CHUNK_SIZE: usize = 8192;

// Archive members worth extracting (case-sensitive, as stored by the vendor)
pub const DATA_FILE_SUFFIXES: &[&str] = &[".BIN", ".CSV"];

// Database code grammar, e.g. DB1, DB11LITEBIN, PX2BIN, DB24CSVIPV6, DBASNLITE
pub const DB_CODE_PATTERN: &str =
    r"^(DB[0-9]{1,2}|PX[0-9]{1,2}|DBASN)(LITE)?(BIN|CSV|MMDB)?(IPV6)?(CIDR)?$";

// Environment
pub const TOKEN_ENV_VAR: &str = "IP2LOCATION_TOKEN";
pub const TMP_DIR_PREFIX: &str = "ip2location-";
