pub mod state_file_vpn;
