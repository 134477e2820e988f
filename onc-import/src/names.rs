//! ONC field names and well-known string values, grouped by object kind.

pub const RECOMMENDED: &str = "Recommended";

pub mod toplevel {
    pub const TYPE: &str = "Type";
    pub const NETWORK_CONFIGURATIONS: &str = "NetworkConfigurations";
    pub const CERTIFICATES: &str = "Certificates";
    pub const GLOBAL_NETWORK_CONFIGURATION: &str = "GlobalNetworkConfiguration";
    pub const UNENCRYPTED_CONFIGURATION: &str = "UnencryptedConfiguration";
    pub const ENCRYPTED_CONFIGURATION: &str = "EncryptedConfiguration";
}

pub mod encrypted {
    pub const CIPHER: &str = "Cipher";
    pub const CIPHERTEXT: &str = "Ciphertext";
    pub const HMAC: &str = "HMAC";
    pub const HMAC_METHOD: &str = "HMACMethod";
    pub const IV: &str = "IV";
    pub const ITERATIONS: &str = "Iterations";
    pub const SALT: &str = "Salt";
    pub const STRETCH: &str = "Stretch";
    pub const AES256: &str = "AES256";
    pub const SHA1: &str = "SHA1";
    pub const PBKDF2: &str = "PBKDF2";
}

pub mod global {
    pub const ALLOW_ONLY_POLICY_NETWORKS_TO_AUTOCONNECT: &str =
        "AllowOnlyPolicyNetworksToAutoconnect";
    pub const ALLOW_ONLY_POLICY_NETWORKS_TO_CONNECT: &str = "AllowOnlyPolicyNetworksToConnect";
    pub const BLACKLISTED_HEX_SSIDS: &str = "BlacklistedHexSSIDs";
    pub const DISABLE_NETWORK_TYPES: &str = "DisableNetworkTypes";
}

pub mod network {
    pub const GUID: &str = "GUID";
    pub const NAME: &str = "Name";
    pub const TYPE: &str = "Type";
    pub const REMOVE: &str = "Remove";
    pub const PRIORITY: &str = "Priority";
    pub const IP_ADDRESS_CONFIG_TYPE: &str = "IPAddressConfigType";
    pub const NAME_SERVERS_CONFIG_TYPE: &str = "NameServersConfigType";
    pub const STATIC_IP_CONFIG: &str = "StaticIPConfig";
    pub const PROXY_SETTINGS: &str = "ProxySettings";
    pub const ETHERNET: &str = "Ethernet";
    pub const WIFI: &str = "WiFi";
    pub const WIMAX: &str = "WiMAX";
    pub const CELLULAR: &str = "Cellular";
    pub const VPN: &str = "VPN";
}

pub mod network_type {
    pub const ALL_TYPES: &str = "All";
    pub const CELLULAR: &str = "Cellular";
    pub const ETHERNET: &str = "Ethernet";
    pub const VPN: &str = "VPN";
    pub const WIFI: &str = "WiFi";
    pub const WIMAX: &str = "WiMAX";
    pub const WIRELESS: &str = "Wireless";
}

pub mod certificate {
    pub const GUID: &str = "GUID";
    pub const TYPE: &str = "Type";
    pub const REMOVE: &str = "Remove";
    pub const X509: &str = "X509";
    pub const PKCS12: &str = "PKCS12";
    pub const TRUST_BITS: &str = "TrustBits";
    pub const SERVER: &str = "Server";
    pub const AUTHORITY: &str = "Authority";
    pub const CLIENT: &str = "Client";
}

pub mod ethernet {
    pub const AUTHENTICATION: &str = "Authentication";
    pub const EAP: &str = "EAP";
}

pub mod wifi {
    pub const ALLOW_GATEWAY_ARP_POLLING: &str = "AllowGatewayARPPolling";
    pub const AUTO_CONNECT: &str = "AutoConnect";
    pub const EAP: &str = "EAP";
    pub const HEX_SSID: &str = "HexSSID";
    pub const HIDDEN_SSID: &str = "HiddenSSID";
    pub const PASSPHRASE: &str = "Passphrase";
    pub const ROAM_THRESHOLD: &str = "RoamThreshold";
    pub const SECURITY: &str = "Security";
    pub const SSID: &str = "SSID";
}

pub mod wimax {
    pub const AUTO_CONNECT: &str = "AutoConnect";
    pub const EAP: &str = "EAP";
}

pub mod cellular {
    pub const APN: &str = "APN";
    pub const AUTO_CONNECT: &str = "AutoConnect";
    pub const ACCESS_POINT_NAME: &str = "AccessPointName";
    pub const USERNAME: &str = "Username";
    pub const PASSWORD: &str = "Password";
}

pub mod vpn {
    pub const AUTO_CONNECT: &str = "AutoConnect";
    pub const HOST: &str = "Host";
    pub const IPSEC: &str = "IPsec";
    pub const L2TP: &str = "L2TP";
    pub const OPENVPN: &str = "OpenVPN";
    pub const TYPE: &str = "Type";
    pub const USERNAME: &str = "Username";
    pub const PASSWORD: &str = "Password";
    pub const SAVE_CREDENTIALS: &str = "SaveCredentials";
    pub const TYPE_IPSEC: &str = "IPsec";
    pub const TYPE_L2TP_IPSEC: &str = "L2TP-IPsec";
    pub const TYPE_OPENVPN: &str = "OpenVPN";
    pub const TYPE_THIRD_PARTY: &str = "ThirdPartyVPN";
}

pub mod client_cert {
    pub const CLIENT_CERT_PATTERN: &str = "ClientCertPattern";
    pub const CLIENT_CERT_REF: &str = "ClientCertRef";
    pub const CLIENT_CERT_TYPE: &str = "ClientCertType";
    pub const ENROLLMENT_URI: &str = "EnrollmentURI";
    pub const ISSUER: &str = "Issuer";
    pub const ISSUER_CA_REF: &str = "IssuerCARef";
    pub const ISSUER_CA_PEMS: &str = "IssuerCAPEMs";
    pub const SUBJECT: &str = "Subject";
    pub const COMMON_NAME: &str = "CommonName";
    pub const LOCALITY: &str = "Locality";
    pub const ORGANIZATION: &str = "Organization";
    pub const ORGANIZATIONAL_UNIT: &str = "OrganizationalUnit";
}

pub mod eap {
    pub const ANONYMOUS_IDENTITY: &str = "AnonymousIdentity";
    pub const IDENTITY: &str = "Identity";
    pub const INNER: &str = "Inner";
    pub const OUTER: &str = "Outer";
    pub const PASSWORD: &str = "Password";
    pub const SAVE_CREDENTIALS: &str = "SaveCredentials";
    pub const SERVER_CA_PEMS: &str = "ServerCAPEMs";
    pub const SERVER_CA_REF: &str = "ServerCARef";
    pub const SERVER_CA_REFS: &str = "ServerCARefs";
    pub const USE_PROACTIVE_KEY_CACHING: &str = "UseProactiveKeyCaching";
    pub const USE_SYSTEM_CAS: &str = "UseSystemCAs";
}

pub mod ipsec {
    pub const AUTHENTICATION_TYPE: &str = "AuthenticationType";
    pub const EAP: &str = "EAP";
    pub const GROUP: &str = "Group";
    pub const IKE_VERSION: &str = "IKEVersion";
    pub const PSK: &str = "PSK";
    pub const SERVER_CA_PEMS: &str = "ServerCAPEMs";
    pub const SERVER_CA_REF: &str = "ServerCARef";
    pub const SERVER_CA_REFS: &str = "ServerCARefs";
    pub const XAUTH: &str = "XAUTH";
}

pub mod openvpn {
    pub const AUTH: &str = "Auth";
    pub const AUTH_NO_CACHE: &str = "AuthNoCache";
    pub const AUTH_RETRY: &str = "AuthRetry";
    pub const CIPHER: &str = "Cipher";
    pub const COMP_LZO: &str = "CompLZO";
    pub const COMP_NO_ADAPT: &str = "CompNoAdapt";
    pub const IGNORE_DEFAULT_ROUTE: &str = "IgnoreDefaultRoute";
    pub const KEY_DIRECTION: &str = "KeyDirection";
    pub const NS_CERT_TYPE: &str = "NsCertType";
    pub const OTP: &str = "OTP";
    pub const PORT: &str = "Port";
    pub const PROTO: &str = "Proto";
    pub const PUSH_PEER_INFO: &str = "PushPeerInfo";
    pub const REMOTE_CERT_EKU: &str = "RemoteCertEKU";
    pub const REMOTE_CERT_KU: &str = "RemoteCertKU";
    pub const REMOTE_CERT_TLS: &str = "RemoteCertTLS";
    pub const RENEG_SEC: &str = "RenegSec";
    pub const SERVER_CA_PEMS: &str = "ServerCAPEMs";
    pub const SERVER_CA_REF: &str = "ServerCARef";
    pub const SERVER_CA_REFS: &str = "ServerCARefs";
    pub const SERVER_CERT_PEM: &str = "ServerCertPEM";
    pub const SERVER_CERT_REF: &str = "ServerCertRef";
    pub const SERVER_POLL_TIMEOUT: &str = "ServerPollTimeout";
    pub const SHAPER: &str = "Shaper";
    pub const STATIC_CHALLENGE: &str = "StaticChallenge";
    pub const TLS_AUTH_CONTENTS: &str = "TLSAuthContents";
    pub const TLS_REMOTE: &str = "TLSRemote";
    pub const USER_AUTHENTICATION_TYPE: &str = "UserAuthenticationType";
    pub const VERB: &str = "Verb";
    pub const VERIFY_HASH: &str = "VerifyHash";
    pub const VERIFY_X509: &str = "VerifyX509";
}

pub mod verify_x509 {
    pub const NAME: &str = "Name";
    pub const TYPE: &str = "Type";
}

pub mod ipconfig {
    pub const GATEWAY: &str = "Gateway";
    pub const IP_ADDRESS: &str = "IPAddress";
    pub const NAME_SERVERS: &str = "NameServers";
    pub const ROUTING_PREFIX: &str = "RoutingPrefix";
    pub const SEARCH_DOMAINS: &str = "SearchDomains";
    pub const TYPE: &str = "Type";
    pub const WEB_PROXY_AUTO_DISCOVERY_URL: &str = "WebProxyAutoDiscoveryUrl";
}

pub mod proxy {
    pub const TYPE: &str = "Type";
    pub const MANUAL: &str = "Manual";
    pub const PAC: &str = "PAC";
    pub const EXCLUDE_DOMAINS: &str = "ExcludeDomains";
    pub const HOST: &str = "Host";
    pub const PORT: &str = "Port";
    pub const FTP: &str = "FTPProxy";
    pub const HTTP: &str = "HTTPProxy";
    pub const HTTPS: &str = "SecureHTTPProxy";
    pub const SOCKS: &str = "SOCKS";
    pub const DIRECT: &str = "Direct";
    pub const WPAD: &str = "WPAD";
}

pub mod substitutes {
    pub const LOGIN_ID: &str = "${LOGIN_ID}";
    pub const EMAIL: &str = "${LOGIN_EMAIL}";
}
