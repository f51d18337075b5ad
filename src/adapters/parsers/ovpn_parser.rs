use std::path::Path;

use tracing::debug;

use crate::adapters::cipher::age_envelope::{AgeEnvelope, OpenError};
use crate::core::models::configuration::{
    Configuration, DEFAULT_PORT, Endpoint, Keepalive, Protocol, TlsWrap, TlsWrapStrategy,
    UnknownDirectivePolicy,
};
use crate::core::models::import::{ErrorKind, ParseOutcome};
use crate::core::traits::parser::ConfigurationParser;

/// Directives accepted without affecting the resulting configuration.
const IGNORED: &[&str] = &[
    "client",
    "nobind",
    "persist-key",
    "persist-tun",
    "resolv-retry",
    "verb",
    "mute",
    "mute-replay-warnings",
    "auth-nocache",
    "remote-cert-tls",
    "verify-x509-name",
    "tls-client",
    "pull",
    "explicit-exit-notify",
    "setenv",
    "float",
    "ping-timer-rem",
    "script-security",
    "sndbuf",
    "rcvbuf",
];

/// Directives that can never work with this client.
const UNSUPPORTED: &[&str] = &[
    "fragment",
    "http-proxy",
    "socks-proxy",
    "secret",
    "ns-cert-type",
    "connection",
];

/// Parses OpenVPN-style `.ovpn` profiles, optionally sealed with a passphrase.
///
/// Supports:
/// - `directive arg...` lines, `#` and `;` comments
/// - inline `<ca>`, `<cert>`, `<key>`, `<tls-auth>`, `<tls-crypt>` blocks
/// - age passphrase-encrypted files (see `AgeEnvelope`)
pub struct OvpnParser {
    policy: UnknownDirectivePolicy,
}

/// A file that parsed, plus the first warning raised along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub config: Configuration,
    pub warning: Option<Failure>,
}

/// A single offending option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub detail: String,
}

impl Failure {
    fn malformed(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MalformedOption,
            detail: detail.into(),
        }
    }

    fn missing(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MissingOption,
            detail: detail.into(),
        }
    }

    fn unsupported(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UnsupportedOption,
            detail: detail.into(),
        }
    }
}

type Step = std::result::Result<Option<Failure>, Failure>;

impl OvpnParser {
    pub fn new(policy: UnknownDirectivePolicy) -> Self {
        Self { policy }
    }

    /// Parse plaintext profile content.
    pub fn parse_str(&self, content: &str) -> std::result::Result<Parsed, Failure> {
        let mut builder = Builder::default();
        let mut warning = None;
        let mut lines = content.lines();

        while let Some(raw) = lines.next() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let step = match block_tag(line) {
                Some(tag) => {
                    let closing = format!("</{tag}>");
                    let mut body = Vec::new();
                    let mut closed = false;
                    for inner in lines.by_ref() {
                        if inner.trim() == closing {
                            closed = true;
                            break;
                        }
                        body.push(inner.trim_end());
                    }
                    if !closed {
                        return Err(Failure::malformed(format!("<{tag}>")));
                    }
                    self.block(&mut builder, tag, body.join("\n"))?
                }
                None => {
                    let mut tokens = line.split_whitespace();
                    let directive = tokens.next().unwrap_or_default();
                    let args: Vec<&str> = tokens.collect();
                    self.directive(&mut builder, directive, &args)?
                }
            };

            if warning.is_none() {
                warning = step;
            }
        }

        Ok(Parsed {
            config: builder.finish()?,
            warning,
        })
    }

    fn block(&self, builder: &mut Builder, tag: &str, body: String) -> Step {
        match tag {
            "ca" => builder.ca = Some(body),
            "cert" => builder.cert = Some(body),
            "key" => builder.key = Some(body),
            "tls-auth" => builder.tls_wrap = Some((TlsWrapStrategy::Auth, body)),
            "tls-crypt" => builder.tls_wrap = Some((TlsWrapStrategy::Crypt, body)),
            other if UNSUPPORTED.contains(&other) => {
                return Err(Failure::unsupported(format!("<{other}>")));
            }
            other => return self.unknown(&format!("<{other}>")),
        }
        Ok(None)
    }

    fn directive(&self, builder: &mut Builder, directive: &str, args: &[&str]) -> Step {
        let line = || {
            std::iter::once(directive)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ")
        };
        let arity = |min: usize, max: usize| {
            if args.len() < min || args.len() > max {
                Err(Failure::malformed(line()))
            } else {
                Ok(())
            }
        };

        match directive {
            d if IGNORED.contains(&d) => {}
            d if UNSUPPORTED.contains(&d) => return Err(Failure::unsupported(d)),

            "dev" => {
                arity(1, 1)?;
                if args[0].starts_with("tap") {
                    return Err(Failure::unsupported("dev tap"));
                }
                if !args[0].starts_with("tun") {
                    return Err(Failure::malformed(line()));
                }
            }
            "proto" => {
                arity(1, 1)?;
                builder.protocol =
                    Some(Protocol::from_directive(args[0]).ok_or_else(|| Failure::malformed(line()))?);
            }
            "port" => {
                arity(1, 1)?;
                builder.port = Some(parse_port(args[0]).ok_or_else(|| Failure::malformed(line()))?);
            }
            "remote" => {
                arity(1, 3)?;
                let port = match args.get(1) {
                    Some(p) => Some(parse_port(p).ok_or_else(|| Failure::malformed(line()))?),
                    None => None,
                };
                let protocol = match args.get(2) {
                    Some(p) => {
                        Some(Protocol::from_directive(p).ok_or_else(|| Failure::malformed(line()))?)
                    }
                    None => None,
                };
                builder.remotes.push((args[0].to_string(), port, protocol));
            }
            "remote-random" => {
                arity(0, 0)?;
                builder.randomize_remotes = true;
            }
            "cipher" => {
                arity(1, 1)?;
                builder.cipher = Some(args[0].to_string());
            }
            "data-ciphers" | "ncp-ciphers" => {
                arity(1, 1)?;
                builder.data_ciphers = args[0].split(':').map(str::to_string).collect();
            }
            "auth" => {
                arity(1, 1)?;
                builder.digest = Some(args[0].to_string());
            }
            "key-direction" => {
                arity(1, 1)?;
                builder.key_direction = match args[0] {
                    "0" => Some(0),
                    "1" => Some(1),
                    _ => return Err(Failure::malformed(line())),
                };
            }
            "keepalive" => {
                arity(2, 2)?;
                let interval_secs = args[0].parse().map_err(|_| Failure::malformed(line()))?;
                let timeout_secs = args[1].parse().map_err(|_| Failure::malformed(line()))?;
                builder.keepalive = Some(Keepalive {
                    interval_secs,
                    timeout_secs,
                });
            }
            "reneg-sec" => {
                arity(1, 1)?;
                builder.renegotiation_secs =
                    Some(args[0].parse().map_err(|_| Failure::malformed(line()))?);
            }
            "comp-lzo" => {
                arity(0, 1)?;
                if args.first() == Some(&"no") {
                    builder.compression = Some("stub".into());
                } else {
                    builder.compression = Some("lzo".into());
                    return Ok(Some(Failure::unsupported(line())));
                }
            }
            "compress" => {
                arity(0, 1)?;
                match args.first() {
                    None | Some(&"stub") | Some(&"stub-v2") => {
                        builder.compression = Some("stub".into());
                    }
                    Some(algorithm) => {
                        builder.compression = Some(algorithm.to_string());
                        return Ok(Some(Failure::unsupported(line())));
                    }
                }
            }
            "dhcp-option" => {
                arity(1, 2)?;
                match (args[0], args.get(1)) {
                    ("DNS" | "DNS6", Some(server)) => builder.dns_servers.push(server.to_string()),
                    ("DOMAIN" | "DOMAIN-SEARCH", Some(domain)) => {
                        builder.search_domain = Some(domain.to_string());
                    }
                    ("DNS" | "DNS6" | "DOMAIN" | "DOMAIN-SEARCH", None) => {
                        return Err(Failure::malformed(line()));
                    }
                    _ => {}
                }
            }
            "redirect-gateway" => builder.redirect_gateway = true,
            "route" => {
                arity(1, 4)?;
                builder.routes.push(args.join(" "));
            }
            "auth-user-pass" => {
                if !args.is_empty() {
                    return Err(Failure::unsupported(line()));
                }
                builder.requires_credentials = true;
            }
            "ca" | "cert" | "key" | "tls-auth" | "tls-crypt" => {
                // Only inline blocks travel with an imported file.
                return Err(Failure::unsupported(line()));
            }
            other => return self.unknown(other),
        }
        Ok(None)
    }

    fn unknown(&self, name: &str) -> Step {
        match self.policy {
            UnknownDirectivePolicy::Error => Err(Failure::unsupported(name)),
            UnknownDirectivePolicy::Warn => Ok(Some(Failure::unsupported(name))),
            UnknownDirectivePolicy::Ignore => {
                debug!(directive = name, "ignoring unknown directive");
                Ok(None)
            }
        }
    }
}

impl ConfigurationParser for OvpnParser {
    fn parse(&self, location: &Path, secret: Option<&str>) -> ParseOutcome {
        debug!(location = %location.display(), "parsing configuration");

        let raw = match std::fs::read(location) {
            Ok(bytes) => bytes,
            Err(e) => {
                return ParseOutcome::FatalError {
                    kind: ErrorKind::Other,
                    detail: e.to_string(),
                };
            }
        };

        let bytes = if AgeEnvelope::is_sealed(&raw) {
            let Some(secret) = secret else {
                return ParseOutcome::NeedsSecret {
                    kind: ErrorKind::EncryptionSecretRequired,
                };
            };
            match AgeEnvelope::open(&raw, secret) {
                Ok(plaintext) => plaintext,
                Err(OpenError::WrongPassphrase) => {
                    return ParseOutcome::NeedsSecret {
                        kind: ErrorKind::DecryptionFailed,
                    };
                }
                Err(OpenError::Corrupt(reason)) => {
                    return ParseOutcome::FatalError {
                        kind: ErrorKind::DecryptionFailed,
                        detail: reason,
                    };
                }
            }
        } else {
            raw
        };

        let Ok(content) = String::from_utf8(bytes) else {
            return ParseOutcome::FatalError {
                kind: ErrorKind::Other,
                detail: "file is not valid UTF-8 text".into(),
            };
        };

        match self.parse_str(&content) {
            Ok(Parsed {
                config,
                warning: None,
            }) => ParseOutcome::Success(config),
            Ok(Parsed {
                config,
                warning: Some(w),
            }) => ParseOutcome::RecoverableWarning {
                config,
                kind: w.kind,
                detail: w.detail,
            },
            Err(f) => ParseOutcome::FatalError {
                kind: f.kind,
                detail: f.detail,
            },
        }
    }
}

/// `<ca>` -> `ca`. Closing tags and plain lines yield `None`.
fn block_tag(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('<')?.strip_suffix('>')?;
    if inner.starts_with('/') || inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

fn parse_port(value: &str) -> Option<u16> {
    value.parse::<u16>().ok().filter(|p| *p != 0)
}

#[derive(Default)]
struct Builder {
    remotes: Vec<(String, Option<u16>, Option<Protocol>)>,
    port: Option<u16>,
    protocol: Option<Protocol>,
    randomize_remotes: bool,
    cipher: Option<String>,
    data_ciphers: Vec<String>,
    digest: Option<String>,
    ca: Option<String>,
    cert: Option<String>,
    key: Option<String>,
    tls_wrap: Option<(TlsWrapStrategy, String)>,
    key_direction: Option<u8>,
    compression: Option<String>,
    keepalive: Option<Keepalive>,
    renegotiation_secs: Option<u32>,
    dns_servers: Vec<String>,
    search_domain: Option<String>,
    routes: Vec<String>,
    redirect_gateway: bool,
    requires_credentials: bool,
}

impl Builder {
    fn finish(self) -> std::result::Result<Configuration, Failure> {
        if self.remotes.is_empty() {
            return Err(Failure::missing("remote"));
        }
        let Some(ca) = self.ca else {
            return Err(Failure::missing("ca"));
        };

        let default_port = self.port.unwrap_or(DEFAULT_PORT);
        let default_protocol = self.protocol.unwrap_or(Protocol::Udp);
        let remotes = self
            .remotes
            .into_iter()
            .map(|(host, port, protocol)| Endpoint {
                host,
                port: port.unwrap_or(default_port),
                protocol: protocol.unwrap_or(default_protocol),
            })
            .collect();

        let key_direction = self.key_direction;
        let tls_wrap = self.tls_wrap.map(|(strategy, key)| TlsWrap {
            strategy,
            key,
            direction: match strategy {
                TlsWrapStrategy::Auth => key_direction,
                TlsWrapStrategy::Crypt => None,
            },
        });

        Ok(Configuration {
            remotes,
            randomize_remotes: self.randomize_remotes,
            cipher: self.cipher,
            data_ciphers: self.data_ciphers,
            digest: self.digest,
            ca,
            client_certificate: self.cert,
            client_key: self.key,
            tls_wrap,
            compression: self.compression,
            keepalive: self.keepalive,
            renegotiation_secs: self.renegotiation_secs,
            dns_servers: self.dns_servers,
            search_domain: self.search_domain,
            routes: self.routes,
            redirect_gateway: self.redirect_gateway,
            requires_credentials: self.requires_credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CA: &str = "<ca>\n-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n</ca>";

    fn profile(body: &str) -> String {
        format!("client\ndev tun\n{body}\n{CA}\n")
    }

    fn warn_parser() -> OvpnParser {
        OvpnParser::new(UnknownDirectivePolicy::Warn)
    }

    #[test]
    fn parse_minimal_profile() {
        let parsed = warn_parser()
            .parse_str(&profile("remote vpn.example.com"))
            .unwrap();

        assert_eq!(parsed.warning, None);
        assert_eq!(
            parsed.config.remotes,
            vec![Endpoint {
                host: "vpn.example.com".into(),
                port: 1194,
                protocol: Protocol::Udp,
            }]
        );
        assert!(parsed.config.ca.contains("BEGIN CERTIFICATE"));
    }

    #[test]
    fn remote_inherits_port_and_proto_declared_later() {
        let parsed = warn_parser()
            .parse_str(&profile(
                "remote a.example.com\nremote b.example.com 1195 udp\nport 443\nproto tcp-client",
            ))
            .unwrap();

        let remotes = &parsed.config.remotes;
        assert_eq!(remotes[0].port, 443);
        assert_eq!(remotes[0].protocol, Protocol::Tcp);
        assert_eq!(remotes[1].port, 1195);
        assert_eq!(remotes[1].protocol, Protocol::Udp);
    }

    #[test]
    fn parse_full_profile() {
        let content = profile(
            "remote vpn.example.com 1194\n\
             remote-random\n\
             cipher AES-256-CBC\n\
             data-ciphers AES-256-GCM:AES-128-GCM\n\
             auth SHA256\n\
             key-direction 1\n\
             keepalive 10 60\n\
             reneg-sec 0\n\
             compress\n\
             dhcp-option DNS 10.8.0.1\n\
             dhcp-option DOMAIN corp.example\n\
             redirect-gateway def1\n\
             route 10.0.0.0 255.0.0.0\n\
             auth-user-pass\n\
             <tls-auth>\nKEY\n</tls-auth>\n\
             <cert>\nCERT\n</cert>\n\
             <key>\nPRIVATE\n</key>",
        );

        let config = warn_parser().parse_str(&content).unwrap().config;

        assert!(config.randomize_remotes);
        assert_eq!(config.cipher.as_deref(), Some("AES-256-CBC"));
        assert_eq!(config.data_ciphers, vec!["AES-256-GCM", "AES-128-GCM"]);
        assert_eq!(config.digest.as_deref(), Some("SHA256"));
        assert_eq!(
            config.keepalive,
            Some(Keepalive {
                interval_secs: 10,
                timeout_secs: 60
            })
        );
        assert_eq!(config.renegotiation_secs, Some(0));
        assert_eq!(config.compression.as_deref(), Some("stub"));
        assert_eq!(config.dns_servers, vec!["10.8.0.1"]);
        assert_eq!(config.search_domain.as_deref(), Some("corp.example"));
        assert!(config.redirect_gateway);
        assert_eq!(config.routes, vec!["10.0.0.0 255.0.0.0"]);
        assert!(config.requires_credentials);
        assert_eq!(
            config.tls_wrap,
            Some(TlsWrap {
                strategy: TlsWrapStrategy::Auth,
                key: "KEY".into(),
                direction: Some(1),
            })
        );
        assert_eq!(config.client_certificate.as_deref(), Some("CERT"));
        assert_eq!(config.client_key.as_deref(), Some("PRIVATE"));
    }

    #[test]
    fn comments_are_skipped() {
        let parsed = warn_parser()
            .parse_str(&profile("# a comment\n; another\n\nremote vpn.example.com"))
            .unwrap();
        assert_eq!(parsed.warning, None);
    }

    #[test]
    fn missing_remote() {
        let err = warn_parser().parse_str(&profile("")).unwrap_err();
        assert_eq!(err, Failure::missing("remote"));
    }

    #[test]
    fn missing_ca() {
        let err = warn_parser()
            .parse_str("client\nremote vpn.example.com\n")
            .unwrap_err();
        assert_eq!(err, Failure::missing("ca"));
    }

    #[test]
    fn malformed_port() {
        let err = warn_parser()
            .parse_str(&profile("remote vpn.example.com\nport abc"))
            .unwrap_err();
        assert_eq!(err, Failure::malformed("port abc"));
    }

    #[test]
    fn malformed_remote_arity() {
        let err = warn_parser()
            .parse_str(&profile("remote a 1 udp extra"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedOption);
        assert_eq!(err.detail, "remote a 1 udp extra");
    }

    #[test]
    fn unterminated_block_is_malformed() {
        let err = warn_parser()
            .parse_str("remote vpn.example.com\n<ca>\nMIIB\n")
            .unwrap_err();
        assert_eq!(err, Failure::malformed("<ca>"));
    }

    #[test]
    fn tap_device_unsupported() {
        let err = warn_parser()
            .parse_str("dev tap0\nremote vpn.example.com\n")
            .unwrap_err();
        assert_eq!(err, Failure::unsupported("dev tap"));
    }

    #[test]
    fn fragment_always_unsupported() {
        for policy in [
            UnknownDirectivePolicy::Error,
            UnknownDirectivePolicy::Warn,
            UnknownDirectivePolicy::Ignore,
        ] {
            let err = OvpnParser::new(policy)
                .parse_str(&profile("remote vpn.example.com\nfragment 1300"))
                .unwrap_err();
            assert_eq!(err, Failure::unsupported("fragment"));
        }
    }

    #[test]
    fn external_file_references_unsupported() {
        let err = warn_parser()
            .parse_str("remote vpn.example.com\nca ca.crt\n")
            .unwrap_err();
        assert_eq!(err, Failure::unsupported("ca ca.crt"));
    }

    #[test]
    fn unknown_directive_follows_policy() {
        let content = profile("remote vpn.example.com\nfoo-bar 1");

        let strict = OvpnParser::new(UnknownDirectivePolicy::Error).parse_str(&content);
        assert_eq!(strict.unwrap_err(), Failure::unsupported("foo-bar"));

        let lenient = OvpnParser::new(UnknownDirectivePolicy::Warn)
            .parse_str(&content)
            .unwrap();
        assert_eq!(lenient.warning, Some(Failure::unsupported("foo-bar")));

        let silent = OvpnParser::new(UnknownDirectivePolicy::Ignore)
            .parse_str(&content)
            .unwrap();
        assert_eq!(silent.warning, None);
    }

    #[test]
    fn lzo_compression_warns() {
        let parsed = warn_parser()
            .parse_str(&profile("remote vpn.example.com\ncompress lzo"))
            .unwrap();
        assert_eq!(parsed.warning, Some(Failure::unsupported("compress lzo")));
        assert_eq!(parsed.config.compression.as_deref(), Some("lzo"));

        let disabled = warn_parser()
            .parse_str(&profile("remote vpn.example.com\ncomp-lzo no"))
            .unwrap();
        assert_eq!(disabled.warning, None);
    }

    #[test]
    fn first_warning_wins() {
        let parsed = warn_parser()
            .parse_str(&profile("remote vpn.example.com\ncomp-lzo\nfoo-bar"))
            .unwrap();
        assert_eq!(parsed.warning, Some(Failure::unsupported("comp-lzo")));
    }

    #[test]
    fn fatal_beats_warning() {
        let err = warn_parser()
            .parse_str(&profile("remote vpn.example.com\nfoo-bar\nport 0"))
            .unwrap_err();
        assert_eq!(err, Failure::malformed("port 0"));
    }

    #[test]
    fn parse_file_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let parser = warn_parser();

        let good = dir.path().join("good.ovpn");
        std::fs::write(&good, profile("remote vpn.example.com")).unwrap();
        assert!(matches!(parser.parse(&good, None), ParseOutcome::Success(_)));

        let weird = dir.path().join("weird.ovpn");
        std::fs::write(&weird, profile("remote vpn.example.com\nfoo-bar")).unwrap();
        assert!(matches!(
            parser.parse(&weird, None),
            ParseOutcome::RecoverableWarning { kind: ErrorKind::UnsupportedOption, ref detail, .. }
                if detail == "foo-bar"
        ));

        let binary = dir.path().join("binary.ovpn");
        std::fs::write(&binary, [0xffu8, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            parser.parse(&binary, None),
            ParseOutcome::FatalError { kind: ErrorKind::Other, .. }
        ));

        let missing = dir.path().join("missing.ovpn");
        assert!(matches!(
            parser.parse(&missing, None),
            ParseOutcome::FatalError { kind: ErrorKind::Other, .. }
        ));
    }

    #[test]
    fn parse_sealed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.ovpn");
        let sealed =
            AgeEnvelope::seal(profile("remote vpn.example.com").as_bytes(), "hunter2").unwrap();
        std::fs::write(&path, sealed).unwrap();
        let parser = warn_parser();

        assert_eq!(
            parser.parse(&path, None),
            ParseOutcome::NeedsSecret {
                kind: ErrorKind::EncryptionSecretRequired
            }
        );
        assert_eq!(
            parser.parse(&path, Some("letmein")),
            ParseOutcome::NeedsSecret {
                kind: ErrorKind::DecryptionFailed
            }
        );
        assert!(matches!(
            parser.parse(&path, Some("hunter2")),
            ParseOutcome::Success(_)
        ));
    }

    #[test]
    fn key_sealed_file_is_fatal() {
        use std::io::Write;

        let recipient = age::x25519::Identity::generate().to_public();
        let encryptor =
            age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn age::Recipient))
                .unwrap();
        let mut sealed = Vec::new();
        let mut writer = encryptor.wrap_output(&mut sealed).unwrap();
        writer
            .write_all(profile("remote vpn.example.com").as_bytes())
            .unwrap();
        writer.finish().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyed.ovpn");
        std::fs::write(&path, sealed).unwrap();

        assert!(matches!(
            warn_parser().parse(&path, Some("hunter2")),
            ParseOutcome::FatalError { kind: ErrorKind::DecryptionFailed, ref detail }
                if detail.contains("not passphrase-encrypted")
        ));
    }
}
