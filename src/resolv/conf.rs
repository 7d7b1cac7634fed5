//! Channel configuration.

//------------ Config ---------------------------------------------------------

/// User configuration variables of a channel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// The port stamped into address nodes.
    port: u16,

    /// Treat a response with only CNAME records as having no data.
    cname_only_is_nodata: bool,
}

impl Config {
    /// Return the value of the port configuration variable.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Set the value of the port configuration variable.
    pub fn set_port(&mut self, value: u16) {
        self.port = value
    }

    /// Return the value of the cname_only_is_nodata configuration variable.
    pub fn cname_only_is_nodata(&self) -> bool {
        self.cname_only_is_nodata
    }

    /// Set the value of the cname_only_is_nodata configuration variable.
    pub fn set_cname_only_is_nodata(&mut self, value: bool) {
        self.cname_only_is_nodata = value
    }
}
