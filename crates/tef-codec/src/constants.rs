//! Control bytes, transport/presentation headers, and the response-code dictionary.

/// Start of text. Marks the beginning of every frame.
pub const STX: u8 = 0x02;
/// End of text. Immediately precedes the LRC byte.
pub const ETX: u8 = 0x03;
/// Field separator, written once before every TLV field.
pub const SEPARATOR: u8 = 0x1C;
/// Transport-level acknowledgement sent back after a validated frame.
pub const ACK: u8 = 0x06;
/// Transport-level negative acknowledgement. Not emitted by this codec, but
/// recognized so callers can distinguish it from a malformed frame.
pub const NACK: u8 = 0x15;

/// Fixed 10-byte decimal-ASCII transport header preceding the presentation header.
pub const TRANSPORT_HEADER: &[u8; 10] = b"6000000000";

/// Presentation header for a purchase (sale) request.
///
/// The same bytes are used whether [`PurchaseRequest::send_pan`] is true or
/// false; see `DESIGN.md` for why this flag has no wire effect in this profile.
///
/// [`PurchaseRequest::send_pan`]: crate::request::PurchaseRequest::send_pan
pub const PURCHASE_HEADER: &[u8; 7] = b"1000000";

/// Presentation header for a reversal (void) request.
pub const REVERSAL_HEADER: &[u8; 7] = b"1002000";

/// Presentation header for the optional pre-purchase handshake variant.
/// Note the two embedded ASCII spaces — this is not a typo.
pub const HANDSHAKE_HEADER: &[u8; 7] = b"1000  0";

/// Other fixed presentation headers the terminal dictionary recognizes.
/// These are not driven by any operation this crate exposes; they exist so a
/// caller decoding an unexpected response header doesn't treat it as garbage.
pub const BALANCE_INQUIRY_HEADER: &[u8; 7] = b"1003000";
pub const CASH_ADVANCE_HEADER: &[u8; 7] = b"1004000";
pub const CLOSE_HEADER: &[u8; 7] = b"1005000";
pub const COUPON_HEADER: &[u8; 7] = b"1006000";
pub const BONO_RECHARGE_HEADER: &[u8; 7] = b"1007000";

/// Field number for the response code (approval iff trimmed value is `"00"`).
pub const FIELD_RESPONSE_CODE: &str = "48";
pub const FIELD_AUTH_CODE: &str = "01";
pub const FIELD_AMOUNT: &str = "40";
pub const FIELD_TAX: &str = "41";
pub const FIELD_TERMINAL_ID: &str = "42";
pub const FIELD_LOT: &str = "43";
pub const FIELD_INVOICE: &str = "44";
pub const FIELD_HOST_REF: &str = "45";
pub const FIELD_DATE_TIME: &str = "46";
pub const FIELD_SEQUENCE: &str = "47";
pub const FIELD_FRANCHISE: &str = "49";
pub const FIELD_ACCOUNT_TYPE: &str = "50";
pub const FIELD_ENTRY_MODE: &str = "51";
pub const FIELD_TRANSACTION_ID: &str = "53";
pub const FIELD_LAST4: &str = "54";
pub const FIELD_MASKED_PAN: &str = "75";
pub const FIELD_RECEIPT_NUMBER: &str = "76";
pub const FIELD_MERCHANT_NAME: &str = "77";
pub const FIELD_MERCHANT_ADDRESS: &str = "78";
pub const FIELD_RESULT: &str = "79";
pub const FIELD_TIP: &str = "81";
pub const FIELD_IAC: &str = "82";
pub const FIELD_CASHIER_ID: &str = "83";
pub const FIELD_FILLER: &str = "84";
pub const FIELD_RESERVED_85: &str = "85";
pub const FIELD_RESERVED_86: &str = "86";

/// Literal value written for the purchase request's filler field (84).
pub const FILLER_VALUE: &str = "000000000000";

/// Approval is exactly this trimmed value of field 48.
pub const APPROVED_CODE: &str = "00";

/// Human-readable messages for known decline codes, keyed by the two-digit code.
///
/// Any code not in this table yields `"Código desconocido: <code>"`.
pub const DECLINE_MESSAGES: &[(&str, &str)] = &[
    ("01", "Contactar al emisor"),
    ("02", "Contactar al emisor"),
    ("03", "Comercio no registrado"),
    ("04", "Retener tarjeta"),
    ("07", "Retener tarjeta"),
    ("05", "No honrar"),
    ("06", "Error"),
    ("96", "Error"),
    ("12", "Transacción inválida"),
    ("13", "Monto inválido"),
    ("14", "Tarjeta inválida"),
    ("15", "Emisor inválido"),
    ("19", "Reintentar"),
    ("30", "Error de formato"),
    ("41", "Tarjeta perdida"),
    ("43", "Tarjeta robada"),
    ("51", "Fondos insuficientes"),
    ("54", "Tarjeta expirada"),
    ("55", "PIN inválido"),
    ("57", "No permitida"),
    ("58", "No permitida"),
    ("59", "Sospecha de fraude"),
    ("61", "Excede el límite"),
    ("65", "Excede el límite"),
    ("62", "Tarjeta restringida"),
    ("63", "Violación de seguridad"),
    ("75", "Excede intentos de PIN"),
    ("76", "Original no encontrada"),
    ("77", "Monto no coincide"),
    ("78", "Cuenta inexistente"),
    ("85", "Sin razón para declinar"),
    ("91", "Emisor no disponible"),
    ("92", "Destino inalcanzable"),
    ("93", "No se puede completar"),
    ("94", "Duplicada"),
    ("99", "Problema de comunicación"),
];
