//! Compiled-in default stubs
//!
//! `catalog-scaffold templates init` copies these into the project's stub
//! directory, where they can be customized.

use super::TemplateSource;
use crate::error::{Result, ScaffoldError};

/// Stubs shipped with the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStubs;

impl EmbeddedStubs {
    /// Text of an embedded stub
    #[must_use]
    pub fn get(name: &str) -> Option<&'static str> {
        let text = match name {
            "model" => MODEL_STUB,
            "controller" => CONTROLLER_STUB,
            "request" => REQUEST_STUB,
            "seeder" => SEEDER_STUB,
            "react/index" => REACT_INDEX_STUB,
            "react/create" => REACT_CREATE_STUB,
            "react/edit" => REACT_EDIT_STUB,
            "react/form" => REACT_FORM_STUB,
            _ => return None,
        };
        Some(text)
    }
}

impl TemplateSource for EmbeddedStubs {
    fn read_template(&self, name: &str) -> Result<String> {
        Self::get(name)
            .map(ToString::to_string)
            .ok_or_else(|| ScaffoldError::TemplateMissing {
                name: name.to_string(),
                location: "embedded stubs".to_string(),
            })
    }
}

const MODEL_STUB: &str = r##"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;

class {{modelName}} extends Model
{
    use HasFactory;

    protected $table = '{{table}}';

    protected $fillable = [{{fillable}}];
}
"##;

const CONTROLLER_STUB: &str = r##"<?php

namespace App\Http\Controllers;

use App\Http\Requests\{{modelName}}Request;
use App\Models\{{modelName}};
use Illuminate\Http\RedirectResponse;
use Illuminate\Routing\Controllers\HasMiddleware;
use Illuminate\Routing\Controllers\Middleware;
use Inertia\Inertia;
use Inertia\Response;

class {{modelName}}Controller extends Controller implements HasMiddleware
{
    public static function middleware(): array
    {
        return [
            new Middleware('permission:view {{tableName}}', only: ['index']),
            new Middleware('permission:create {{tableName}}', only: ['create', 'store']),
            new Middleware('permission:edit {{tableName}}', only: ['edit', 'update']),
            new Middleware('permission:delete {{tableName}}', only: ['destroy']),
        ];
    }

    public function index(): Response
    {
        return Inertia::render('{{modelName}}/Index', [
            '{{tableName}}' => {{modelName}}::latest()->get(),
        ]);
    }

    public function create(): Response
    {
        return Inertia::render('{{modelName}}/Create');
    }

    public function store({{modelName}}Request $request): RedirectResponse
    {
        {{modelName}}::create($request->validated());

        return redirect()->route('{{tableName}}.index')
            ->with('success', '{{modelName}} created.');
    }

    public function edit({{modelName}} ${{modelVariable}}): Response
    {
        return Inertia::render('{{modelName}}/Edit', [
            '{{modelVariable}}' => ${{modelVariable}},
        ]);
    }

    public function update({{modelName}}Request $request, {{modelName}} ${{modelVariable}}): RedirectResponse
    {
        ${{modelVariable}}->update($request->validated());

        return redirect()->route('{{tableName}}.index')
            ->with('success', '{{modelName}} updated.');
    }

    public function destroy({{modelName}} ${{modelVariable}}): RedirectResponse
    {
        ${{modelVariable}}->delete();

        return redirect()->route('{{tableName}}.index')
            ->with('success', '{{modelName}} deleted.');
    }
}
"##;

const REQUEST_STUB: &str = r##"<?php

namespace App\Http\Requests;

use Illuminate\Foundation\Http\FormRequest;

class {{modelName}}Request extends FormRequest
{
    public function authorize(): bool
    {
        return true;
    }

    public function rules(): array
    {
        return [
{{rules}}
        ];
    }
}
"##;

const SEEDER_STUB: &str = r##"<?php

namespace Database\Seeders;

use Illuminate\Database\Seeder;
use Spatie\Permission\Models\Permission;
use Spatie\Permission\Models\Role;

class {{modelName}}PermissionsSeeder extends Seeder
{
    public function run(): void
    {
        $permissions = [
{{permissions}}
        ];

        foreach ($permissions as $permission) {
            Permission::firstOrCreate(['name' => $permission, 'guard_name' => 'web']);
        }

        $superAdmin = Role::where('name', 'SuperAdmin')->first();

        if ($superAdmin) {
            $superAdmin->givePermissionTo($permissions);
        }
    }
}
"##;

const REACT_INDEX_STUB: &str = r##"import { DataTableActions } from '@/components/DataTableActions';
import { Button } from '@/components/ui/button';
import { usePermission } from '@/hooks/usePermission';
import AppLayout from '@/layouts/app-layout';
import { dashboard } from '@/routes';
import { type BreadcrumbItem } from '@/types';
import { Head, Link } from '@inertiajs/react';
import {
    type ColumnDef,
    type SortingState,
    flexRender,
    getCoreRowModel,
    getSortedRowModel,
    useReactTable,
} from '@tanstack/react-table';
import { ArrowUpDown, PlusCircle } from 'lucide-react';
import { useState } from 'react';

export interface {{modelName}} {
{{interface}}
}

interface IndexProps {
    {{tableName}}: {{modelName}}[];
}

const breadcrumbs: BreadcrumbItem[] = [
    {
        title: 'Dashboard',
        href: dashboard().url,
    },
    {
        title: '{{modelName}}',
        href: '/{{tableName}}',
    },
];

const columns: ColumnDef<{{modelName}}>[] = [
    {{columns}}
    {
        id: 'actions',
        cell: ({ row }) => (
            <DataTableActions
                id={row.original.id}
                editRoute={`/{{tableName}}/${row.original.id}/edit`}
                deleteRoute={`/{{tableName}}/${row.original.id}`}
                editPermission="edit {{tableName}}"
                deletePermission="delete {{tableName}}"
            />
        ),
    },
];

export default function Index({ {{tableName}}: {{modelVariablePlural}} }: IndexProps) {
    const { can } = usePermission();
    const [sorting, setSorting] = useState<SortingState>([]);

    const table = useReactTable({
        data: {{modelVariablePlural}},
        columns,
        state: { sorting },
        onSortingChange: setSorting,
        getCoreRowModel: getCoreRowModel(),
        getSortedRowModel: getSortedRowModel(),
    });

    return (
        <AppLayout breadcrumbs={breadcrumbs}>
            <Head title="{{modelName}}" />

            <div className="flex h-full flex-1 flex-col gap-4 overflow-x-auto rounded-xl p-4">
                <div className="flex items-center justify-between">
                    <h1 className="text-2xl font-bold">{{modelName}}</h1>
                    {can('create {{tableName}}') && (
                        <Button asChild>
                            <Link href="/{{tableName}}/create">
                                <PlusCircle className="mr-2 h-4 w-4" />
                                New {{modelName}}
                            </Link>
                        </Button>
                    )}
                </div>

                <div className="relative overflow-hidden rounded-xl border border-sidebar-border/70 dark:border-sidebar-border">
                    <table className="w-full">
                        <thead className="border-b border-sidebar-border/70 bg-sidebar/50">
                            {table.getHeaderGroups().map((headerGroup) => (
                                <tr key={headerGroup.id}>
                                    {headerGroup.headers.map((header) => (
                                        <th key={header.id} className="px-6 py-3 text-left text-sm font-medium">
                                            {header.isPlaceholder
                                                ? null
                                                : flexRender(header.column.columnDef.header, header.getContext())}
                                        </th>
                                    ))}
                                </tr>
                            ))}
                        </thead>
                        <tbody>
                            {table.getRowModel().rows.map((row) => (
                                <tr
                                    key={row.id}
                                    className="border-b border-sidebar-border/50 last:border-0 hover:bg-sidebar/30"
                                >
                                    {row.getVisibleCells().map((cell) => (
                                        <td key={cell.id} className="px-6 py-3">
                                            {flexRender(cell.column.columnDef.cell, cell.getContext())}
                                        </td>
                                    ))}
                                </tr>
                            ))}
                        </tbody>
                    </table>
                </div>
            </div>
        </AppLayout>
    );
}
"##;

const REACT_CREATE_STUB: &str = r##"import AppLayout from '@/layouts/app-layout';
import { dashboard } from '@/routes';
import { type BreadcrumbItem } from '@/types';
import { Head, Link } from '@inertiajs/react';
import Form from './Form';

const {{modelVariablePlural}}Url = '/{{tableName}}';

const breadcrumbs: BreadcrumbItem[] = [
    {
        title: 'Dashboard',
        href: dashboard().url,
    },
    {
        title: '{{modelName}}',
        href: {{modelVariablePlural}}Url,
    },
    {
        title: 'Create',
        href: `${{{modelVariablePlural}}Url}/create`,
    },
];

export default function Create() {
    return (
        <AppLayout breadcrumbs={breadcrumbs}>
            <Head title="Create {{modelName}}" />

            <div className="flex h-full flex-1 flex-col gap-4 overflow-x-auto rounded-xl p-4">
                <div className="flex items-center justify-between">
                    <h1 className="text-2xl font-bold">Create {{modelName}}</h1>
                    <Link href={{{modelVariablePlural}}Url} className="text-sm text-muted-foreground hover:underline">
                        ← Back
                    </Link>
                </div>

                <div className="relative overflow-hidden rounded-xl border border-sidebar-border/70 p-6 dark:border-sidebar-border">
                    <Form method="post" submitUrl={{{modelVariablePlural}}Url} submitLabel="Create {{modelName}}" />
                </div>
            </div>
        </AppLayout>
    );
}
"##;

const REACT_EDIT_STUB: &str = r##"import AppLayout from '@/layouts/app-layout';
import { dashboard } from '@/routes';
import { type BreadcrumbItem } from '@/types';
import { Head, Link } from '@inertiajs/react';
import Form from './Form';

interface {{modelName}} {
{{interface}}
}

interface EditProps {
    {{modelVariable}}: {{modelName}};
}

const {{modelVariablePlural}}Url = '/{{tableName}}';

export default function Edit({ {{modelVariable}} }: EditProps) {
    const breadcrumbs: BreadcrumbItem[] = [
        {
            title: 'Dashboard',
            href: dashboard().url,
        },
        {
            title: '{{modelName}}',
            href: {{modelVariablePlural}}Url,
        },
        {
            title: 'Edit',
            href: `${{{modelVariablePlural}}Url}/${ {{modelVariable}}.id }/edit`,
        },
    ];

    return (
        <AppLayout breadcrumbs={breadcrumbs}>
            <Head title="Edit {{modelName}}" />

            <div className="flex h-full flex-1 flex-col gap-4 overflow-x-auto rounded-xl p-4">
                <div className="flex items-center justify-between">
                    <h1 className="text-2xl font-bold">Edit {{modelName}}</h1>
                    <Link href={{{modelVariablePlural}}Url} className="text-sm text-muted-foreground hover:underline">
                        ← Back
                    </Link>
                </div>

                <div className="relative overflow-hidden rounded-xl border border-sidebar-border/70 p-6 dark:border-sidebar-border">
                    <Form
                        {{modelVariable}}={ {{modelVariable}} }
                        method="put"
                        submitUrl={`${{{modelVariablePlural}}Url}/${ {{modelVariable}}.id }`}
                        submitLabel="Update {{modelName}}"
                    />
                </div>
            </div>
        </AppLayout>
    );
}
"##;

const REACT_FORM_STUB: &str = r##"import { Button } from '@/components/ui/button';
import { Input } from '@/components/ui/input';
import { Label } from '@/components/ui/label';
import { useForm } from '@inertiajs/react';
import { type FormEventHandler } from 'react';

interface {{modelName}} {
{{interface}}
}

interface FormProps {
    {{modelVariable}}?: {{modelName}};
    method: 'post' | 'put';
    submitUrl: string;
    submitLabel: string;
}

export default function Form({ {{modelVariable}}, method, submitUrl, submitLabel }: FormProps) {
    const { data, setData, submit, processing, errors } = useForm<Partial<{{modelName}}>>({ ...{{modelVariable}} });

    const handleSubmit: FormEventHandler = (e) => {
        e.preventDefault();
        submit(method, submitUrl);
    };

    return (
        <form onSubmit={handleSubmit} className="space-y-4">
            {{formFields}}

            <Button type="submit" disabled={processing}>
                {submitLabel}
            </Button>
        </form>
    );
}
"##;
