pub mod ovpn_parser;
