//! Static classification taxonomy and dropdown lookups.
//!
//! # Responsibility
//! - Hold the institutional category table as an immutable lookup.
//! - Flatten categories into dropdown options in declared order.
//!
//! # Invariants
//! - Table order is the only order; nothing here sorts.
//! - Lookups never fail: unknown ids produce empty results.

use crate::model::category::{
    Category, CategoryOption, SubCategory, SubSubCategory, SubcategoryOption,
};

const fn sub(
    value: &'static str,
    text: &'static str,
    children: &'static [SubSubCategory],
) -> SubCategory {
    SubCategory {
        value,
        text,
        children,
    }
}

const fn leaf(value: &'static str, text: &'static str) -> SubSubCategory {
    SubSubCategory { value, text }
}

const CATEGORIES: &[Category] = &[
    Category {
        id: "OT",
        name: "Organisasi dan Tata Laksana",
        subcategories: &[
            sub("OT.00", "Organisasi", &[]),
            sub("OT.01", "Tata Laksana", &[
                leaf("OT.01.1", "Perencanaan"),
                leaf("OT.01.2", "Laporan"),
                leaf("OT.01.3", "Penyusunan Prosedur Kerja"),
                leaf("OT.01.4", "Penyusunan Pembakuan Sarana Kerja"),
            ]),
        ],
    },
    Category {
        id: "HM",
        name: "Kehumasan",
        subcategories: &[
            sub("HM.00", "Penerangan", &[]),
            sub("HM.01", "Hubungan", &[]),
            sub("HM.02", "Dokumentasi dan Keputusan", &[
                leaf("HM.02.1", "Dokumentasi"),
                leaf("HM.02.2", "Kepustakaan"),
            ]),
            sub("HM.03", "Keprotokolan", &[]),
        ],
    },
    Category {
        id: "KP",
        name: "Kepegawaian",
        subcategories: &[
            sub("KP.00", "Pengadaan", &[
                leaf("KP.00.1", "Formasi"),
                leaf("KP.00.2", "Penerimaan"),
                leaf("KP.00.3", "Pengangkatan"),
            ]),
            sub("KP.01", "Tata Usaha Kepegawaian", &[
                leaf("KP.01.1", "Izin/Dispensasi"),
                leaf("KP.01.2", "Keterangan"),
            ]),
            sub("KP.02", "Pendidikan Latihan", &[
                leaf("KP.02.1", "Diklat Prajabatan"),
                leaf("KP.02.2", "Diklat Dalam Jabatan"),
                leaf("KP.02.3", "Latihan/Kursus Penataran"),
            ]),
            sub("KP.03", "KORPRI", &[
                leaf("KP.03.1", "Dharma Wanita"),
                leaf("KP.03.2", "Pemilu"),
            ]),
            sub("KP.04", "Penilaian dan Hukuman", &[
                leaf("KP.04.1", "Penilaian"),
                leaf("KP.04.2", "Hukuman"),
            ]),
            sub("KP.05", "Screening", &[]),
            sub("KP.06", "Pembinaan Mental", &[]),
            sub("KP.07", "Mutasi", &[
                leaf("KP.07.1", "Kepangkatan"),
                leaf("KP.07.2", "Kenaikan Berkala"),
                leaf("KP.07.3", "Penyesuaian Masa Kerja"),
                leaf("KP.07.4", "Penyesuaian Tunjangan Keluarga"),
                leaf("KP.07.5", "Alih Tugas"),
                leaf("KP.07.6", "Jabatan Struktural/Fungsional"),
            ]),
            sub("KP.08", "Kesejahteraan", &[
                leaf("KP.08.1", "Kesehatan"),
                leaf("KP.08.2", "Cuti"),
                leaf("KP.08.3", "Rekreasi"),
                leaf("KP.08.4", "Bantuan Sosial"),
                leaf("KP.08.5", "Koperasi"),
                leaf("KP.08.6", "Perumahan"),
                leaf("KP.08.7", "Antar Jemput"),
                leaf("KP.08.8", "Penghargaan"),
            ]),
            sub("KP.09", "Pemutusan Hubungan Kerja", &[
                leaf("KP.09.1", "Pensiun"),
                leaf("KP.09.2", "Asuransi"),
                leaf("KP.09.3", "Meninggal Dunia"),
            ]),
        ],
    },
    Category {
        id: "KU",
        name: "Keuangan",
        subcategories: &[
            sub("KU.00", "Anggaran", &[
                leaf("KU.00.1", "Rutin"),
                leaf("KU.00.2", "Pembangunan"),
                leaf("KU.00.3", "Non Budgetter"),
            ]),
            sub("KU.01", "S P P", &[
                leaf("KU.01.1", "SPP Beban Tetap dan Sementara Rutin"),
                leaf("KU.01.2", "SPP Beban Tetap dan Sementara Pembangunan"),
            ]),
            sub("KU.02", "SPJ Rutin/Pembangunan", &[
                leaf("KU.02.1", "SPJ Rutin"),
                leaf("KU.02.2", "SPJ Pembangunan"),
                leaf("KU.02.3", "SPJ Non Budgetter"),
            ]),
            sub("KU.03", "Pendapatan Negara", &[
                leaf("KU.03.1", "Pajak"),
                leaf("KU.03.2", "Bukan Pajak"),
            ]),
            sub("KU.04", "Perbankan", &[
                leaf("KU.04.1", "Valuta asing/Transfer"),
                leaf("KU.04.2", "Saldo rekening"),
            ]),
            sub("KU.05", "Sumbangan/Bantuan", &[]),
        ],
    },
    Category {
        id: "KS",
        name: "Kesekretariatan",
        subcategories: &[
            sub("KS.00", "Kerumahtanggaan", &[
                leaf("KS.00.1", "Pinjam Fasilitas"),
                leaf("KS.00.2", "Konsumsi"),
                leaf("KS.00.3", "Keamanan"),
                leaf("KS.00.4", "Pakaian Dinas"),
                leaf("KS.00.5", "Papan Nama"),
            ]),
            sub("KS.01", "Perlengkapan", &[
                leaf("KS.01.1", "Gedung"),
                leaf("KS.01.2", "Alat Kantor"),
                leaf("KS.01.3", "Mesin Kantor/Alat Elektronik"),
                leaf("KS.01.4", "Perabot Kantor"),
                leaf("KS.01.5", "Kendaraan"),
                leaf("KS.01.6", "Inventaris Perlengkapan"),
                leaf("KS.01.7", "Penawaran Umum"),
            ]),
            sub("KS.02", "Ketatausahaan", &[
                leaf("KS.02.1", "Korespondensi dan Kearsipan"),
                leaf("KS.02.2", "Surat"),
                leaf("KS.02.3", "Cap Dinas"),
            ]),
        ],
    },
    Category {
        id: "HK",
        name: "Hukum",
        subcategories: &[
            sub("HK.00", "Peraturan Perundang-undangan", &[
                leaf("HK.00.1", "Undang-undang termasuk PERPU"),
                leaf("HK.00.2", "Peraturan Pemerintah"),
                leaf("HK.00.3", "Keputusan Presiden, Instruksi Presiden"),
                leaf("HK.00.4", "Peraturan Menteri, Instruksi Menteri"),
                leaf("HK.00.5", "Keputusan Menteri, Pimpinan Unit Eselon I, II"),
                leaf("HK.00.6", "SKB Menteri-Menteri/Pimpinan Unit Eselon I, II"),
                leaf("HK.00.7", "Edaran Menteri/Pimpinan Unit Eselon I, II"),
                leaf("HK.00.8", "Peraturan Kanwil/Kankemenag"),
                leaf("HK.00.9", "Peraturan PEMDA"),
            ]),
            sub("HK.01", "Pidana", &[
                leaf("HK.01.1", "Pencurian"),
                leaf("HK.01.2", "Korupsi"),
            ]),
            sub("HK.02", "Perdata", &[
                leaf("HK.02.1", "Perikatan"),
            ]),
            sub("HK.03", "Hukum Agama", &[
                leaf("HK.03.1", "Fatwa"),
                leaf("HK.03.2", "Rukyat/Hisab"),
                leaf("HK.03.3", "Hari Besar Islam"),
            ]),
            sub("HK.04", "Bantuan Hukum", &[
                leaf("HK.04.1", "Kasus Hukum Pidana"),
                leaf("HK.04.2", "Kasus Hukum Perdata"),
                leaf("HK.04.3", "Penelaahan Hukum"),
            ]),
        ],
    },
    Category {
        id: "PW",
        name: "Perkawinan",
        subcategories: &[
            sub("PW.00", "Penyuluhan", &[]),
            sub("PW.01", "Perkawinan", &[]),
            sub("PW.02", "Campuran Antar Agama dan Bangsa", &[]),
        ],
    },
    Category {
        id: "HJ",
        name: "Haji",
        subcategories: &[
            sub("HJ.00", "Calon Haji", &[]),
            sub("HJ.01", "Bimbingan", &[]),
            sub("HJ.02", "Petugas Haji", &[]),
            sub("HJ.03", "Ongkos Naik Haji", &[]),
            sub("HJ.04", "Jamaah Calon Haji", &[]),
            sub("HJ.05", "Angkutan", &[]),
            sub("HJ.06", "Pengasramaan", &[]),
            sub("HJ.07", "Pembekalan", &[]),
            sub("HJ.08", "Dispensasi/ Recomendasi Khusus", &[]),
            sub("HJ.09", "Umroh", &[]),
        ],
    },
    Category {
        id: "BA",
        name: "Pembinaan Agama",
        subcategories: &[
            sub("BA.00", "Penyuluhan", &[]),
            sub("BA.01", "Bimbingan", &[
                leaf("BA.01.1", "Lembaga Keagamaan"),
                leaf("BA.01.2", "Aliran Kerohanian/Keagamaan"),
            ]),
            sub("BA.02", "Kerukunan Hidup Beragama", &[]),
            sub("BA.03", "Ibadah Dan Ibadah Sosial", &[
                leaf("BA.03.1", "Ibadah"),
                leaf("BA.03.2", "Ibadah Sosial"),
            ]),
            sub("BA.04", "Pengembangan Keagamaan", &[]),
            sub("BA.05", "Rohaniwan", &[]),
        ],
    },
    Category {
        id: "PP",
        name: "Pendidikan dan Pengajaran",
        subcategories: &[
            sub("PP.00", "Kurukulum", &[
                leaf("PP.00.1", "Sekolah Umum Tingkat TK dan SD"),
                leaf("PP.00.2", "Sekolah Umum Tingkat SMTP"),
                leaf("PP.00.3", "Sekolah Umum Tingkat SMTA"),
                leaf("PP.00.4", "Perguruan Agama Tk. RA dan Ibtidaiyah"),
                leaf("PP.00.5", "Perguruan Agama Tk. Tsanawiyah"),
                leaf("PP.00.6", "Perguruan Agama Tk. Aliyah"),
                leaf("PP.00.7", "Pondok Pesantren"),
                leaf("PP.00.8", "Diniyah"),
                leaf("PP.00.9", "Perguruan Tinggi Agama"),
                leaf("PP.00.10", "Perguruan Tinggi Umum"),
                leaf("PP.00.11", "Pengembangan Sarjana Pendidikan"),
            ]),
            sub("PP.01", "Evaluasi dan Ijazah", &[
                leaf("PP.01.1", "Perguruan Agama"),
                leaf("PP.01.2", "Perguruan Umum"),
            ]),
            sub("PP.02", "Kepenilikan, Pengawasan dan Pembinaan", &[
                leaf("PP.02.1", "Kepenilikan"),
                leaf("PP.02.2", "Pengawasan"),
                leaf("PP.02.3", "Pembinaan"),
            ]),
            sub("PP.03", "Kelembagaan", &[
                leaf("PP.03.1", "Organisasi (Ekstra Kurikuler)"),
                leaf("PP.03.2", "Pengembangan (Filial, Kelas Jauh, Penyesuaian Status Swasta-Negeri)"),
            ]),
            sub("PP.04", "Beasiswa", &[]),
            sub("PP.05", "Sumbangan", &[]),
            sub("PP.06", "Pengabdian", &[]),
            sub("PP.07", "Perizinan", &[]),
        ],
    },
    Category {
        id: "PS",
        name: "Pengawasan",
        subcategories: &[
            sub("PS.00", "Pengawasan Administrasi Umum", &[]),
            sub("PS.01", "Tugas Umum", &[]),
            sub("PS.02", "Proyek Pembangunan", &[
                leaf("PS.02.1", "Fisik"),
                leaf("PS.02.2", "Non Fisik"),
            ]),
        ],
    },
];

/// Returns the full category table in declared order.
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

/// Finds one category by id.
pub fn find_category(category_id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == category_id)
}

/// Lists every top-level category as `{id, name}` in table order.
pub fn get_category_options() -> Vec<CategoryOption> {
    CATEGORIES
        .iter()
        .map(|category| CategoryOption {
            id: category.id.to_string(),
            name: category.name.to_string(),
        })
        .collect()
}

/// Flattens one category's subcategories and their children.
///
/// Each parent is immediately followed by its children. Unknown ids yield an
/// empty list.
pub fn get_subcategory_options(category_id: &str) -> Vec<SubcategoryOption> {
    let Some(category) = find_category(category_id) else {
        return Vec::new();
    };

    let mut options = Vec::new();
    for subcategory in category.subcategories {
        options.push(SubcategoryOption::labeled(
            subcategory.value,
            subcategory.text,
        ));
        options.extend(
            subcategory
                .children
                .iter()
                .map(|child| SubcategoryOption::labeled(child.value, child.text)),
        );
    }
    options
}

/// Returns whether `code` is a subcategory or child code of `category_id`.
pub fn is_known_subcategory(category_id: &str, code: &str) -> bool {
    find_category(category_id).is_some_and(|category| {
        category.subcategories.iter().any(|subcategory| {
            subcategory.value == code || subcategory.children.iter().any(|child| child.value == code)
        })
    })
}
