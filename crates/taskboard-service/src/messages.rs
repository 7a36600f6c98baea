//! User-facing message copy (Indonesian, carried over from the original
//! deployment). Everything the API returns in a `{"message"}` body lives
//! here.

pub const PROJECT_NAME_EMPTY: &str = "Nama proyek tidak boleh kosong.";
pub const PROJECT_NAME_TAKEN: &str = "Nama proyek sudah ada.";
pub const PROJECT_NOT_FOUND: &str = "Proyek tidak ditemukan.";
pub const PROJECT_DELETED: &str = "Proyek dan tugas terkait berhasil dihapus.";

pub const TASK_FIELDS_REQUIRED: &str = "Semua field wajib diisi.";
pub const TASK_DATA_INVALID: &str = "Data tidak valid atau terjadi kesalahan server.";
pub const TASK_STATUS_INVALID: &str = "Status tidak valid.";
pub const TASK_NOT_FOUND: &str = "Tugas tidak ditemukan.";
pub const TASK_DELETED: &str = "Tugas berhasil dihapus.";

pub const MEMBER_FIELDS_REQUIRED: &str = "Nama dan Jabatan wajib diisi.";
pub const MEMBER_NAME_TAKEN: &str = "Nama anggota sudah ada.";
pub const MEMBER_NAME_IN_USE: &str = "Nama anggota tersebut sudah digunakan.";
pub const MEMBER_NOT_FOUND: &str = "Anggota tidak ditemukan.";
pub const MEMBER_DELETED: &str = "Anggota berhasil dihapus.";

pub const UNAUTHORIZED: &str = "Kode otorisasi salah atau tidak valid.";
pub const SERVER_ERROR: &str = "Terjadi kesalahan pada server.";
